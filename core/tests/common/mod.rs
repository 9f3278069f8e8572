// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared helpers for controller tests

#![allow(dead_code)]

use anyhow::{anyhow, Result};
use chessboard_core::{
    BoardEvent, EventOutcome, GameExporter, GameRecord, InteractionController, ShakmatyEngine,
    UiCoord,
};
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

/// Exporter that remembers every record it was handed
#[derive(Clone, Default)]
pub struct RecordingExporter {
    pub records: Rc<RefCell<Vec<GameRecord>>>,
}

impl GameExporter for RecordingExporter {
    fn export(&mut self, record: &GameRecord) -> Result<PathBuf> {
        let mut records = self.records.borrow_mut();
        records.push(record.clone());
        Ok(PathBuf::from(format!("game{}.pgn", records.len())))
    }
}

/// Exporter standing in for an unwritable disk
pub struct FailingExporter;

impl GameExporter for FailingExporter {
    fn export(&mut self, _record: &GameRecord) -> Result<PathBuf> {
        Err(anyhow!("disk full"))
    }
}

pub fn controller() -> (InteractionController<ShakmatyEngine>, RecordingExporter) {
    let exporter = RecordingExporter::default();
    let controller = InteractionController::new(Box::new(exporter.clone()));
    (controller, exporter)
}

pub fn controller_from_fen(fen: &str) -> (InteractionController<ShakmatyEngine>, RecordingExporter) {
    let exporter = RecordingExporter::default();
    let engine = ShakmatyEngine::from_fen(fen).expect("valid FEN");
    let controller = InteractionController::with_engine(engine, Box::new(exporter.clone()));
    (controller, exporter)
}

/// Screen coordinate of a square such as "e2" on an unflipped board
pub fn at(name: &str) -> UiCoord {
    let bytes = name.as_bytes();
    let file = bytes[0] - b'a';
    let rank = bytes[1] - b'1';
    UiCoord::new(7 - rank, file)
}

pub fn click(ctrl: &mut InteractionController<ShakmatyEngine>, coord: UiCoord) -> EventOutcome {
    ctrl.handle_event(BoardEvent::Click(coord)).expect("click handled")
}

/// Click origin then destination, returning the outcome of the second click
pub fn play(ctrl: &mut InteractionController<ShakmatyEngine>, from: &str, to: &str) -> EventOutcome {
    click(ctrl, at(from));
    click(ctrl, at(to))
}
