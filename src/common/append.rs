use std::ops::RangeInclusive;

use log::debug;

use crate::common::{
    error::{SymbolError, SymbolResult},
    metadata::VersionCandidate,
};

// Template
//------------------------------------------------------------------------------

/// Fixed layout every symbol of a structured-append sequence reuses.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct AppendTemplate {
    pub candidate: VersionCandidate,
    /// Metadata codewords spent in every segment: index, total, message id
    /// and any mode switch the payload needs
    pub overhead: usize,
    pub max_segments: usize,
    pub message_ids: RangeInclusive<u32>,
}

impl AppendTemplate {
    pub fn segment_capacity(&self) -> SymbolResult<usize> {
        match self.candidate.data_capacity.checked_sub(self.overhead) {
            Some(cap) if cap > 0 => Ok(cap),
            _ => Err(SymbolError::TemplateTooSmall),
        }
    }
}

// Segment
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct AppendSegment<'a, T> {
    /// Zero based position in the sequence
    pub index: usize,
    pub total: usize,
    pub payload: &'a [T],
    pub message_id: Option<u32>,
}

// Plan
//------------------------------------------------------------------------------

/// Splits `payload` into the fewest consecutive slices that fit `template`.
///
/// Empty payload yields an empty plan. Every segment carries the same total,
/// `ceil(len / capacity)`, and only the last slice may be short.
pub fn plan<'a, T>(
    payload: &'a [T],
    template: &AppendTemplate,
    message_id: Option<u32>,
) -> SymbolResult<Vec<AppendSegment<'a, T>>> {
    if let Some(id) = message_id {
        if !template.message_ids.contains(&id) {
            return Err(SymbolError::InvalidMessageId(id));
        }
    }

    let capacity = template.segment_capacity()?;
    if payload.is_empty() {
        return Ok(Vec::new());
    }

    let total = payload.len().div_ceil(capacity);
    if total > template.max_segments {
        return Err(SymbolError::TooManySegments { needed: total, max: template.max_segments });
    }

    debug!("Splitting {} codewords into {total} segments of at most {capacity}", payload.len());
    Ok(payload
        .chunks(capacity)
        .enumerate()
        .map(|(index, payload)| AppendSegment { index, total, payload, message_id })
        .collect())
}

#[cfg(test)]
mod append_tests {
    use test_case::test_case;

    use super::{plan, AppendTemplate};
    use crate::common::{error::SymbolError, metadata::VersionCandidate};

    fn template(data_capacity: usize, overhead: usize) -> AppendTemplate {
        AppendTemplate {
            candidate: VersionCandidate::new(5, data_capacity, 14),
            overhead,
            max_segments: 16,
            message_ids: 1..=64516,
        }
    }

    #[test_case(0, 0)]
    #[test_case(1, 1)]
    #[test_case(12, 1)]
    #[test_case(13, 2)]
    #[test_case(36, 3)]
    #[test_case(37, 4)]
    fn test_segment_count(len: usize, total: usize) {
        let payload: Vec<u8> = (0..len).map(|i| i as u8).collect();
        let segments = plan(&payload, &template(18, 6), Some(7)).unwrap();
        assert_eq!(segments.len(), total);
        for (i, seg) in segments.iter().enumerate() {
            assert_eq!(seg.index, i);
            assert_eq!(seg.total, total);
            assert_eq!(seg.message_id, Some(7));
            assert!(!seg.payload.is_empty() && seg.payload.len() <= 12);
        }
        let joined: Vec<u8> = segments.iter().flat_map(|s| s.payload.iter().copied()).collect();
        assert_eq!(joined, payload);
    }

    #[test_case(6, 6)]
    #[test_case(6, 9)]
    fn test_template_too_small(data_capacity: usize, overhead: usize) {
        let err = plan(b"abc", &template(data_capacity, overhead), None).unwrap_err();
        assert_eq!(err, SymbolError::TemplateTooSmall);
    }

    #[test]
    fn test_template_checked_before_empty_payload() {
        let err = plan::<u8>(&[], &template(4, 6), None).unwrap_err();
        assert_eq!(err, SymbolError::TemplateTooSmall);
    }

    #[test]
    fn test_too_many_segments() {
        let payload = [0u8; 17];
        let err = plan(&payload, &template(7, 6), None).unwrap_err();
        assert_eq!(err, SymbolError::TooManySegments { needed: 17, max: 16 });
        assert_eq!(plan(&payload[..16], &template(7, 6), None).unwrap().len(), 16);
    }

    #[test_case(0)]
    #[test_case(64517)]
    fn test_invalid_message_id(id: u32) {
        let err = plan(b"abc", &template(18, 6), Some(id)).unwrap_err();
        assert_eq!(err, SymbolError::InvalidMessageId(id));
    }
}
