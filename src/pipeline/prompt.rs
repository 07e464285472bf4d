//! Prompt construction: map a request to the system/user prompt pair.
//!
//! This is the only place where the enumerated options, the source text, and
//! the uploaded images meet. The function is pure and deterministic — the same
//! request always yields byte-identical prompts — which is what makes the
//! orchestrator testable against a fake completion client.
//!
//! ## Message layout
//!
//! * **System prompt** — mode preamble, then the tone, audience, and style
//!   instruction sentences in that stable order, then the mode suffix.
//! * **User prompt** — the source text (or the prior post plus the requested
//!   changes in revision mode), with the image reference block appended when
//!   images are present.

use crate::prompts::{
    GENERATE_SYSTEM_IMAGES, GENERATE_SYSTEM_PREAMBLE, REVISE_SYSTEM_PREAMBLE,
    REVISE_SYSTEM_SUFFIX,
};
use crate::request::{GenerationRequest, ImageRef, PromptBundle};

/// Build the prompt pair for a generation or revision request.
///
/// Revision mode is selected by a non-empty `revision_prompt`; the prior post
/// is embedded verbatim. Otherwise the source text is embedded, followed by
/// an `Image N: <url>` block listing uploads in input order.
pub fn build_prompt(request: &GenerationRequest) -> PromptBundle {
    if request.is_revision() {
        build_revision_prompt(request)
    } else {
        build_generation_prompt(request)
    }
}

fn build_generation_prompt(request: &GenerationRequest) -> PromptBundle {
    let system_prompt = [
        GENERATE_SYSTEM_PREAMBLE,
        request.tone.instruction(),
        request.audience.instruction(),
        request.style.instruction(),
        GENERATE_SYSTEM_IMAGES,
    ]
    .join("\n");

    let mut content = request.source_text.clone();
    if !request.images.is_empty() {
        content.push_str(&image_block(&request.images));
    }

    let user_prompt = format!(
        "Please create a detailed blog post from this content and include any provided images in relevant sections: {content}"
    );

    PromptBundle {
        system_prompt,
        user_prompt,
    }
}

fn build_revision_prompt(request: &GenerationRequest) -> PromptBundle {
    let system_prompt = [
        REVISE_SYSTEM_PREAMBLE,
        request.tone.instruction(),
        request.audience.instruction(),
        request.style.instruction(),
        REVISE_SYSTEM_SUFFIX,
    ]
    .join("\n");

    let prior = request.prior_post.as_deref().unwrap_or_default();
    let changes = request.revision_prompt.as_deref().unwrap_or_default();
    let user_prompt = format!(
        "Please revise this blog post according to the following request: Current blog post:\n{prior}\n\nRequested changes:\n{changes}"
    );

    PromptBundle {
        system_prompt,
        user_prompt,
    }
}

/// Render the appended image reference block, 1-based, in input order.
fn image_block(images: &[ImageRef]) -> String {
    let mut block =
        String::from("\n\nInclude the following images in appropriate sections of the blog post:\n");
    for (index, image) in images.iter().enumerate() {
        block.push_str(&format!("\nImage {}: {}", index + 1, image.url));
    }
    block
}
