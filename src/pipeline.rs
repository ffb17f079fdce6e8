use canonical::{RewriteConfig, enforce_brand, ensure_narrative, resolve_canonical_brand};
use generator::{ListingGenerator, build_prompt};
use serde_json::Value;
use tracing::{debug, info};

use crate::PipelineError;
use crate::listing::{ListingRequest, ListingResponse};
use crate::metrics::MetricsSpan;

/// Generates one listing end-to-end.
///
/// 1. resolve the canonical brand from the request;
/// 2. build the prompt and ask `generator` for the listing fields;
/// 3. rewrite every brand mention in the generated fields to canonical form;
/// 4. fill `mainText` from the description paragraphs when it is missing;
/// 5. lay out the response.
///
/// Only the generator call can fail. A blank brand skips step 3.
pub async fn generate_listing<G>(
    generator: &G,
    request: &ListingRequest,
    rewrite_cfg: &RewriteConfig,
) -> Result<ListingResponse, PipelineError>
where
    G: ListingGenerator + ?Sized,
{
    let canonical_brand = resolve_canonical_brand(request.raw_brand());
    let prompt = build_prompt(&request.prompt_input(), &canonical_brand);

    let mut generate_metrics = MetricsSpan::start();
    let generated = match generator.generate(&prompt).await {
        Ok(fields) => {
            if let Some(span) = generate_metrics.take() {
                span.record_generate(Ok(()));
            }
            fields
        }
        Err(err) => {
            if let Some(span) = generate_metrics.take() {
                span.record_generate(Err(err.clone()));
            }
            return Err(PipelineError::Generator(err));
        }
    };
    debug!(fields = generated.len(), "listing fields generated");

    let mut canonical_metrics = MetricsSpan::start();
    let mut document = Value::Object(generated);
    let report = enforce_brand(&mut document, request.raw_brand(), rewrite_cfg);
    let filled = ensure_narrative(&mut document);
    if let Some(span) = canonical_metrics.take() {
        span.record_canonical(&report);
    }
    info!(
        canonical_brand = %report.canonical_brand,
        raw_pass = report.raw_pass,
        canonical_pass = report.canonical_pass,
        sweep = report.sweep,
        narrative_filled = filled,
        "brand canonicalized"
    );

    Ok(ListingResponse::assemble(request, &canonical_brand, document))
}
