//! Integration tests for common tokenflags workflows.
//!
//! These tests walk a session from editing controls through persisting the
//! token to handing it to an engine.

use async_trait::async_trait;
use std::sync::Arc;
use tokenflags::prelude::*;
use tokenflags_config::StateStore;
use tokenflags_engine::{
    Artifact, CosmeticCatalog, Engine, EngineError, Invoker, RandomizeRequest, Seed,
    SourceArtifact,
};

// =============================================================================
// Panel Editing
// =============================================================================

#[test]
fn test_single_byte_scenario() {
    let mut panel = Panel::new(1);
    panel
        .register(Control::binary("b", "Binary", FieldAddress::new(0, 0)))
        .unwrap();
    panel
        .register(Control::tri_state("t", "Tri", FieldAddress::new(0, 1)))
        .unwrap();

    panel.set("b", "on").unwrap();
    panel.set("t", "indeterminate").unwrap();
    let token = panel.encode();
    assert_eq!(panel.buffer().as_bytes(), &[0b101]);
    assert_eq!(token.as_str(), "AU");

    let mut fresh = Panel::new(1);
    fresh
        .register(Control::binary("b", "Binary", FieldAddress::new(0, 0)))
        .unwrap();
    fresh
        .register(Control::tri_state("t", "Tri", FieldAddress::new(0, 1)))
        .unwrap();
    fresh.apply(token.as_str());
    assert_eq!(fresh.control("b").unwrap().display(), "on");
    assert_eq!(
        fresh.control("t").unwrap().state(),
        &ControlState::TriState(TriState::Indeterminate)
    );
}

#[test]
fn test_register_reflects_existing_buffer() {
    let mut panel = Panel::with_token(1, "AU");
    let control = panel
        .register(Control::binary("b", "Binary", FieldAddress::new(0, 0)))
        .unwrap();
    assert_eq!(control.display(), "on");
}

#[test]
fn test_overlapping_controls_are_rejected() {
    let mut panel = Panel::new(1);
    panel
        .register(Control::tri_state("t", "Tri", FieldAddress::new(0, 0)))
        .unwrap();

    let err = panel
        .register(Control::binary("b", "Binary", FieldAddress::new(0, 1)))
        .unwrap_err();
    assert!(matches!(err, FlagError::OverlappingField { .. }));
    assert_eq!(panel.len(), 1);
}

#[test]
fn test_classic_default_token_round_trips() {
    let mut panel = preset::classic().unwrap();
    assert_eq!(panel.size(), CLASSIC_SIZE);
    assert_eq!(panel.encode().as_str(), DEFAULT_TOKEN);
    assert_eq!(panel.control("leveling-speed").unwrap().display(), "Fast");
}

#[test]
fn test_layout_file_builds_panel() {
    let layout: Layout = speed_layout();
    let mut panel = layout.build().unwrap();
    panel.set("speed", "C").unwrap();
    assert_eq!(panel.encode(), Base32::encode(&[6 << 2]));
}

fn speed_layout() -> Layout {
    Layout::from_json(
        r#"{
            "size": 1,
            "controls": [
                {
                    "key": "speed",
                    "label": "Speed",
                    "byte": 0,
                    "shift": 2,
                    "kind": "enumerated",
                    "options": [
                        {"label": "A", "value": 0},
                        {"label": "B", "value": 2},
                        {"label": "C", "value": 6}
                    ]
                }
            ]
        }"#,
    )
    .unwrap()
}

// =============================================================================
// Persisted Sessions
// =============================================================================

#[test]
fn test_token_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");

    let token = {
        let mut panel = preset::classic().unwrap();
        panel.activate("random-map").unwrap();
        let token = panel.encode();
        let mut state = StateStore::open(&path).unwrap();
        state.set_flags(token.as_str()).unwrap();
        token
    };

    let state = StateStore::open(&path).unwrap();
    let mut panel = Panel::new(CLASSIC_SIZE);
    panel.register_all(preset::classic_controls()).unwrap();
    panel.apply(state.flags().unwrap());
    assert_eq!(panel.encode(), token);
}

// =============================================================================
// Engine Invocation
// =============================================================================

struct RecordingEngine;

#[async_trait]
impl Engine for RecordingEngine {
    async fn randomize(&self, request: &RandomizeRequest<'_>) -> Result<String, EngineError> {
        let name = Artifact::default_name("Session", request.seed, request.token, "bin");
        let body = format!("{}|{}", request.token, request.cosmetic);
        tokio::fs::write(request.output_dir.join(&name), body).await?;
        Ok(name)
    }

    async fn cosmetic_choice(&self, index: usize) -> Result<Option<String>, EngineError> {
        Ok((index == 0).then(|| "Knight".to_string()))
    }

    async fn version(&self) -> Result<String, EngineError> {
        Ok("recording".to_string())
    }
}

#[tokio::test]
async fn test_edit_then_invoke() {
    let dir = tempfile::tempdir().unwrap();
    let engine = Arc::new(RecordingEngine);

    let catalog = CosmeticCatalog::load(engine.as_ref()).await.unwrap();
    catalog.validate("Knight").unwrap();
    catalog.validate(DEFAULT_COSMETIC).unwrap();

    let mut panel = preset::classic().unwrap();
    panel.set("fast-text", "on").unwrap();
    let token = panel.encode();

    let invoker = Invoker::new(engine, dir.path().join("work"), dir.path().join("out"));
    let source = SourceArtifact::new("game.nes", vec![0x4e, 0x45, 0x53, 0x1a]);
    let artifact = invoker
        .invoke(&source, &token, Seed(99), "Knight")
        .await
        .unwrap();

    assert_eq!(artifact.name, format!("Session.99.{}.bin", token));
    assert_eq!(
        String::from_utf8(artifact.data.to_vec()).unwrap(),
        format!("{}|Knight", token)
    );
}
