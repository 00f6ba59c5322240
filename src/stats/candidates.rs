//! Selected ICE candidate extraction.

use serde::{Deserialize, Serialize};

use super::record::{StatsRecord, StatsReport, StatsType};

/// The local/remote candidates of the selected (or nominated) pair.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectedCandidates {
    pub local: Option<StatsRecord>,
    pub remote: Option<StatsRecord>,
}

impl SelectedCandidates {
    pub fn is_empty(&self) -> bool {
        self.local.is_none() && self.remote.is_none()
    }
}

/// Resolve the candidates referenced by every nominated or selected pair.
///
/// When several pairs qualify, later pairs overwrite earlier ones.
pub fn selected_candidates(report: &StatsReport) -> SelectedCandidates {
    let mut result = SelectedCandidates::default();

    for pair in report.iter().filter(|r| r.kind == StatsType::CandidatePair) {
        if !(pair.flag("nominated") || pair.flag("selected")) {
            continue;
        }
        let local_id = pair.str_field("localCandidateId");
        let remote_id = pair.str_field("remoteCandidateId");

        for record in report.iter() {
            if local_id == Some(record.id.as_str()) {
                result.local = Some(record.clone());
            } else if remote_id == Some(record.id.as_str()) {
                result.remote = Some(record.clone());
            }
        }
    }

    result
}
