// Adapters layer: concrete syllabifiers behind the SyllableSegmenter / SyllableSource ports.

pub mod prefetched;
pub mod remote;
pub mod rules;

pub use prefetched::PrefetchedSegmenter;
pub use remote::RemoteSegmenter;
pub use rules::RuleSegmenter;
