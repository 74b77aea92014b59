pub mod assertions;
pub mod recording_scene;
pub mod snapshot_builder;

pub use recording_scene::{RecordingScene, SceneEntity};
pub use snapshot_builder::SnapshotBuilder;
