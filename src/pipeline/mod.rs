//! Presentation driver and filing step.
//!
//! The driver creates the presentation and submits one batched update per
//! slide, strictly in input order, each call blocking until acknowledged.
//! The first failure aborts the remaining slides; there is no retry and
//! no partial rollback. The filing step then finds or creates the
//! destination folder and reparents the presentation into it.

use crate::api::{ApiError, DriveService, SlidesService};
use crate::builder::build_slide_requests;
use crate::model::{FolderId, PresentationId, SlideObjectIds, SlideRecord};
use tracing::info;

/// Create a presentation and populate it slide by slide.
///
/// Returns the new presentation's identifier. Slides are processed
/// sequentially; a failed batch aborts the rest.
pub fn build_presentation(
    slides: &mut dyn SlidesService,
    title: &str,
    deck: &[SlideRecord],
) -> Result<PresentationId, ApiError> {
    let presentation = slides.create_presentation(title)?;
    info!(id = %presentation, title, "Created presentation");

    for (index, record) in deck.iter().enumerate() {
        let ids = SlideObjectIds::generate();
        let requests = build_slide_requests(record, &ids);
        slides.batch_update(&presentation, &requests)?;
        info!(slide = index + 1, total = deck.len(), "Added slide");
    }

    Ok(presentation)
}

/// File the presentation into the named Drive folder.
///
/// Reuses an existing, non-trashed folder of that exact name when one
/// exists, otherwise creates it. The move adds the target folder and
/// removes all previous parents in one update.
pub fn file_presentation(
    drive: &mut dyn DriveService,
    presentation: &PresentationId,
    folder_name: &str,
) -> Result<FolderId, ApiError> {
    let folder = match drive.find_folder(folder_name)? {
        Some(folder) => {
            info!(folder = %folder, name = folder_name, "Reusing existing folder");
            folder
        }
        None => {
            let folder = drive.create_folder(folder_name)?;
            info!(folder = %folder, name = folder_name, "Created folder");
            folder
        }
    };

    let previous = drive.parents(presentation)?;
    drive.move_file(presentation, &folder, &previous)?;
    info!(folder = %folder, "Presentation moved to folder");

    Ok(folder)
}

/// Render the per-slide request batches as pretty JSON without touching
/// the network.
pub fn render_dry_run(deck: &[SlideRecord]) -> Result<String, serde_json::Error> {
    let batches: Vec<_> = deck
        .iter()
        .map(|record| {
            let ids = SlideObjectIds::generate();
            build_slide_requests(record, &ids)
        })
        .collect();
    serde_json::to_string_pretty(&batches)
}
