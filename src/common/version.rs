use log::{debug, trace};

use crate::common::{
    error::{SymbolError, SymbolResult},
    metadata::{EccRequirement, VersionCandidate},
};

// Selection
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Selection {
    pub candidate: VersionCandidate,
    /// Metadata prefix followed by the assembled data codewords
    pub codewords: Vec<u16>,
    pub ecc_count: usize,
    /// Codewords left over between data and check codewords
    pub padding: usize,
}

// Version selector
//------------------------------------------------------------------------------

/// Picks the smallest candidate able to hold an assembled payload.
///
/// Candidates are tried in table order, which must be ascending capacity. The
/// metadata prefix (reader init, GS1, structured append, ECI headers) is
/// charged before the data codewords, so a candidate that fits plain data may
/// still be rejected once the prefix is counted.
#[derive(Debug, Clone)]
pub struct VersionSelector<'a> {
    candidates: &'a [VersionCandidate],
    preferred: Option<usize>,
    prefix: Vec<u16>,
    ecc: EccRequirement,
    ecc_levels: Option<&'a [usize]>,
}

impl<'a> VersionSelector<'a> {
    pub fn new(candidates: &'a [VersionCandidate]) -> Self {
        Self { candidates, preferred: None, prefix: Vec::new(), ecc: EccRequirement::Nominal, ecc_levels: None }
    }

    pub fn preferred(&mut self, version: Option<usize>) -> &mut Self {
        self.preferred = version;
        self
    }

    pub fn prefix(&mut self, prefix: Vec<u16>) -> &mut Self {
        self.prefix = prefix;
        self
    }

    pub fn ecc(&mut self, ecc: EccRequirement) -> &mut Self {
        self.ecc = ecc;
        self
    }

    /// Allows raising the check codeword count to the largest of `levels` that
    /// still fits the chosen candidate. Only for symbologies whose default ECC
    /// depends on the leftover space.
    pub fn promote_ecc(&mut self, levels: &'a [usize]) -> &mut Self {
        self.ecc_levels = Some(levels);
        self
    }

    pub fn select<F>(&self, mut assemble: F) -> SymbolResult<Selection>
    where
        F: FnMut(&VersionCandidate) -> SymbolResult<Vec<u16>>,
    {
        if let Some(version) = self.preferred {
            let candidate = self
                .candidates
                .iter()
                .find(|c| c.version == version)
                .ok_or(SymbolError::InvalidVersion(version))?;
            let selection = self
                .try_fit(candidate, &mut assemble)?
                .ok_or(SymbolError::DataTooLongForVersion(version))?;
            debug!("Using preferred version {version}");
            return Ok(selection);
        }

        for candidate in self.candidates {
            if let Some(selection) = self.try_fit(candidate, &mut assemble)? {
                debug!(
                    "Selected version {} ({} of {} data codewords, {} ecc)",
                    candidate.version,
                    selection.codewords.len(),
                    candidate.data_capacity,
                    selection.ecc_count
                );
                return Ok(selection);
            }
        }
        Err(SymbolError::DataTooLong)
    }

    fn try_fit<F>(&self, candidate: &VersionCandidate, assemble: &mut F) -> SymbolResult<Option<Selection>>
    where
        F: FnMut(&VersionCandidate) -> SymbolResult<Vec<u16>>,
    {
        let data = assemble(candidate)?;
        let used = self.prefix.len() + data.len();
        if used > candidate.data_capacity {
            trace!("Version {}: {used} data codewords exceed {}", candidate.version, candidate.data_capacity);
            return Ok(None);
        }

        let spare = candidate.total_capacity() - used;
        let required = self.ecc.required(candidate, used);
        if required > spare {
            trace!("Version {}: {required} ecc codewords exceed {spare} spare", candidate.version);
            return Ok(None);
        }

        let ecc_count = match self.ecc_levels {
            Some(levels) => {
                levels.iter().copied().filter(|&l| l >= required && l <= spare).max().unwrap_or(required)
            }
            None => required,
        };

        let mut codewords = self.prefix.clone();
        codewords.extend(data);
        Ok(Some(Selection { candidate: *candidate, codewords, ecc_count, padding: spare - ecc_count }))
    }
}
