//! Sprite preloading
//!
//! All sprite images are kicked off at startup; the host polls
//! [`AssetSet::ready`] each frame and keeps the start screen hidden until
//! every image has arrived. A single failed image flips the whole set to
//! failed so the UI can show an actionable message instead of a half-drawn
//! level.

use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::HtmlImageElement;

use crate::renderer::Sprite;

const SPRITES: [(Sprite, &str); 6] = [
    (Sprite::Player, "assets/player.png"),
    (Sprite::Ground, "assets/ground.png"),
    (Sprite::Background, "assets/background.png"),
    (Sprite::Monster, "assets/monster.png"),
    (Sprite::Bean, "assets/bean.png"),
    (Sprite::Milk, "assets/milk.png"),
];

/// The full set of sprite images plus shared load-progress counters.
#[derive(Clone)]
pub struct AssetSet {
    images: Vec<(Sprite, HtmlImageElement)>,
    loaded: Rc<Cell<usize>>,
    failed: Rc<Cell<bool>>,
}

impl AssetSet {
    /// Start loading every sprite. Returns immediately; progress is
    /// observed through `ready` / `failed` / `progress`.
    pub fn load() -> Result<Self, JsValue> {
        let loaded = Rc::new(Cell::new(0));
        let failed = Rc::new(Cell::new(false));
        let mut images = Vec::with_capacity(SPRITES.len());

        for (sprite, path) in SPRITES {
            let img = HtmlImageElement::new()?;

            let loaded = Rc::clone(&loaded);
            let onload = Closure::<dyn FnMut()>::new(move || {
                loaded.set(loaded.get() + 1);
            });
            img.set_onload(Some(onload.as_ref().unchecked_ref()));
            onload.forget();

            let failed = Rc::clone(&failed);
            let path_owned = path.to_string();
            let onerror = Closure::<dyn FnMut()>::new(move || {
                log::error!("failed to load sprite {path_owned}");
                failed.set(true);
            });
            img.set_onerror(Some(onerror.as_ref().unchecked_ref()));
            onerror.forget();

            img.set_src(path);
            images.push((sprite, img));
        }

        Ok(Self {
            images,
            loaded,
            failed,
        })
    }

    pub fn ready(&self) -> bool {
        self.loaded.get() == self.images.len()
    }

    pub fn failed(&self) -> bool {
        self.failed.get()
    }

    /// Load progress in [0, 1].
    pub fn progress(&self) -> f64 {
        self.loaded.get() as f64 / self.images.len() as f64
    }

    pub fn image(&self, sprite: Sprite) -> Option<&HtmlImageElement> {
        self.images
            .iter()
            .find(|(s, _)| *s == sprite)
            .map(|(_, img)| img)
    }
}
