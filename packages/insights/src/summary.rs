//! Summary builder.
//!
//! Derives the one-line headline and per-category call-outs from
//! already-ranked sections. No ranking happens here.

use nearby_insights_models::{FamilyLife, Highlights, SocialLife, Summary, Transport};
use nearby_places_models::PlaceRecord;

/// Number of names carried per highlight list.
const HIGHLIGHT_LIMIT: usize = 3;

/// Builds the summary from the collected sections.
///
/// Headline counts are the sections' pre-truncation counts; highlight
/// names come from the already-ranked `top` lists.
#[must_use]
pub fn build_summary(
    formatted_address: &str,
    social: &SocialLife,
    family: &FamilyLife,
    transport: &Transport,
) -> Summary {
    let headline = format!(
        "{formatted_address}: {} cafes, {} parks, {} gyms, {} schools, {} hospitals, {} malls nearby.",
        social.cafes.count,
        social.parks.count,
        social.gyms.count,
        family.schools.count,
        family.hospitals.count,
        social.shopping_malls.count,
    );

    Summary {
        headline,
        highlights: Highlights {
            cafes_top: top_names(&social.cafes.top),
            schools_top: top_names(&family.schools.top),
            malls_top: top_names(&social.shopping_malls.top),
            nearest_hospital: nearest_name(family.hospitals.nearest.as_ref()),
            nearest_subway: nearest_name(transport.subway.nearest.as_ref()),
        },
    }
}

/// Names of up to the first [`HIGHLIGHT_LIMIT`] records; unnamed entries
/// are skipped.
fn top_names(records: &[PlaceRecord]) -> Vec<String> {
    records
        .iter()
        .take(HIGHLIGHT_LIMIT)
        .filter_map(|r| r.name.clone())
        .collect()
}

fn nearest_name(nearest: Option<&PlaceRecord>) -> Option<String> {
    nearest.and_then(|r| r.name.clone())
}
