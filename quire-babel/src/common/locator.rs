//! Flat offset → segment mapping.
//!
//! A document (or a run of rendered text nodes) is addressed as one flat
//! character range split into ordered segments. [`locate`] turns an absolute
//! offset into the segment holding it and the offset inside that segment.
//!
//! Boundaries resolve to the end of the earlier segment: with lengths `[3, 4]`,
//! offset 3 is `(0, 3)`, not `(1, 0)`. Offsets past the end clamp to the end of
//! the last segment; callers treat that as "end of document".

/// A position inside one segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextOffset {
    pub segment_index: usize,
    pub local_offset: usize,
}

/// Map `offset` onto `segment_lengths`. Returns `None` when there are no segments.
pub fn locate(segment_lengths: &[usize], offset: usize) -> Option<TextOffset> {
    let mut remaining = offset;
    for (segment_index, &len) in segment_lengths.iter().enumerate() {
        if remaining <= len {
            return Some(TextOffset {
                segment_index,
                local_offset: remaining,
            });
        }
        remaining -= len;
    }

    let (segment_index, &len) = segment_lengths.iter().enumerate().last()?;
    Some(TextOffset {
        segment_index,
        local_offset: len,
    })
}

/// Signed variant for offsets that arrive from untyped callers. Negative
/// offsets are rejected.
pub fn locate_signed(segment_lengths: &[usize], offset: i64) -> Option<TextOffset> {
    let offset = usize::try_from(offset).ok()?;
    locate(segment_lengths, offset)
}
