use serde::Serialize;

/// Progress of the live alignment through the reference words.
///
/// `reference_pos` is the index of the next expected matchable word and only
/// ever moves forward.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlignmentCursor {
    pub reference_pos: usize,
    pub transcript_pos: usize,
    pub matched_count: usize,
    pub miscue_count: usize,
}
