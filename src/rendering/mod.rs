//! Rendering pipeline: composed node tree -> layout -> paint commands -> PNG.
//!
//! The card canvas is a fixed 540x540 logical square rasterized at a fixed
//! 2x output scale (1080x1080) with a transparent background outside the
//! card gradient. Rendering is deterministic: the same composed card always
//! produces the same PNG bytes.

pub mod layout;
pub mod paint;
pub mod raster;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use log::debug;
use sha2::{Digest, Sha256};

use crate::compose::RenderedCard;
use crate::Result;

/// Logical card edge length in pixels.
pub const CARD_SIZE: u32 = 540;

/// Output scale applied during capture.
pub const CAPTURE_SCALE: u32 = 2;

/// A captured card image.
#[derive(Debug, Clone)]
pub struct Screenshot {
    pub width: u32,
    pub height: u32,
    pub png_data: Vec<u8>,
}

impl Screenshot {
    /// The PNG as a `data:` URL suitable for embedding.
    pub fn png_data_url(&self) -> String {
        format!("data:image/png;base64,{}", STANDARD.encode(&self.png_data))
    }

    /// Hex SHA-256 of the PNG bytes; used by golden tests.
    pub fn digest_hex(&self) -> String {
        hex::encode(Sha256::digest(&self.png_data))
    }
}

/// Capture a composed card as a PNG screenshot at the fixed 2x scale.
pub fn capture(card: &RenderedCard) -> Result<Screenshot> {
    let items = layout::layout_card(card);
    let commands = paint::paint_items(&items);
    debug!(
        "capturing card: {} layout items, {} paint commands",
        items.len(),
        commands.len()
    );
    raster::rasterize(&commands, CARD_SIZE, CARD_SIZE, CAPTURE_SCALE)
}
