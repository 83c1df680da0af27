pub mod audio;
pub mod history;
pub mod lighting;
pub mod primitives;
mod scene;
mod tone_bank;

pub use audio::{AudioError, SilentSink, ToneSink, ToneSpec, Voice};
pub use history::HistoryTrail;
pub use lighting::PointLight;
pub use primitives::{CellPrimitive, CellStyle, reconcile};
pub use scene::Scene;
pub use tone_bank::ToneBank;
