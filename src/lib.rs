pub mod allomorph;
pub mod analyzer;
pub mod apply;
pub mod error;
pub mod lexicon;
pub mod lookup;
pub mod rules;
pub mod stats;
pub mod validator;

pub use analyzer::{Morphology, analyze};
pub use apply::{Applied, Process};
pub use error::{PanlexError, Result};
pub use lexicon::Entry;
pub use lookup::{MatchKind, RootHypothesis, RootLookup};
pub use rules::{ProcessType, ReduplicationPattern, Rule, RuleForm, RuleTable};
pub use validator::{Focus, PosTag, is_valid_attachment};
