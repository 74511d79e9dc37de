use wasm_bindgen::prelude::*;
use tma_engine::*;

mod game;
use game::TapBounce;

tma_web::export_game!(TapBounce, "tap-bounce");
