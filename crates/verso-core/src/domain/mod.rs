pub mod camera;
pub mod ids;
pub mod music_structure;
pub mod persisted;
pub mod reorder;
pub mod song;
pub mod strophe;
pub mod verse;
pub mod vocab;
pub mod word;

pub use ids::{ProjectId, StropheId, UserId, VerseId};
pub use persisted::{PersistedDocument, ProjectRecord};
pub use reorder::{Reorder, ReorderOutcome, VerseTarget};
pub use song::{Song, SongInfo};
pub use strophe::Strophe;
pub use verse::Verse;
pub use vocab::{Architecture, Episode, MusicSection, RhymeTag, ShotType};
pub use word::{Color, Word};
