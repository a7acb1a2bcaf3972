//! Plain-text rendering of processing results.

use std::fmt::Write;

use manifest_domain::BatchStatus;

/// Render the full result block for a batch.
///
/// Batches without output get a one-line notice carrying their state and
/// result so a failed async run still tells the operator what happened.
pub fn render_batch(status: &BatchStatus) -> String {
    let mut out = String::new();

    let Some(output) = &status.output else {
        let _ = writeln!(
            out,
            "No output available (state: {}, result: {})",
            status.metadata.state, status.metadata.result
        );
        return out;
    };

    let manifest = &output.general.manifest_info;
    let _ = writeln!(out);
    let _ = writeln!(out, "PROCESSING RESULTS");
    let _ = writeln!(out, "{}", "-".repeat(40));
    let _ = writeln!(out, "Trip Number: {}", manifest.trip_number);
    let _ = writeln!(out, "Manifest: {}", manifest.manifest_number);
    let _ = writeln!(out, "Trailer: {}", manifest.trailer_number);
    let _ = writeln!(
        out,
        "Shipments: {} expected / {} actual",
        manifest.expected_shipments, manifest.actual_shipments
    );
    let _ = writeln!(
        out,
        "Units: {} expected / {} actual",
        manifest.expected_handling_units, manifest.actual_handling_units
    );

    let summary = &output.general.summary;
    let _ = writeln!(out);
    let _ = writeln!(out, "EXCEPTION SUMMARY");
    let _ = writeln!(
        out,
        "Shortages: {} ({} pieces)",
        summary.total_shortages, summary.total_shortage_pieces
    );
    let _ = writeln!(
        out,
        "Overages: {} ({} pieces)",
        summary.total_overages, summary.total_overage_pieces
    );
    let _ = writeln!(
        out,
        "Damages: {} ({} pieces)",
        summary.total_damages, summary.total_damaged_pieces
    );
    let _ = writeln!(out, "Has OS&D: {}", if summary.has_osd_notation { "Yes" } else { "No" });

    let exceptions: Vec<_> = output
        .general
        .shipments
        .iter()
        .filter(|s| s.has_exception())
        .collect();
    if exceptions.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "No exceptions found - clean manifest");
        return out;
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "EXCEPTION DETAILS");
    for (index, shipment) in exceptions.iter().enumerate() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}. PRO: {}", index + 1, shipment.pro_number);
        let _ = writeln!(out, "   Type: {}", shipment.exception_type.to_uppercase());
        let _ = writeln!(
            out,
            "   Expected/Actual: {}/{}",
            shipment.expected_pieces, shipment.actual_pieces
        );
        let _ = writeln!(out, "   Weight: {} lbs", shipment.weight);
        let _ = writeln!(out, "   Description: {}", shipment.description);
        if !shipment.markup_notations.is_empty() {
            let _ = writeln!(out, "   Markups: {}", shipment.markup_notations.join(", "));
        }
        if let Some(notes) = &shipment.handwritten_notes {
            let _ = writeln!(out, "   Notes: {}", notes);
        }
    }

    out
}
