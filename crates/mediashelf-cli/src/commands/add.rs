use super::{prompts, AppContext};
use color_eyre::Result;
use media_shelf_models::{MediaFields, MediaType, Rating};
use serde_json::json;
use tracing::debug;

pub async fn run_add(
    ctx: &AppContext,
    media_type: Option<MediaType>,
    title: Option<String>,
    rating: Option<Rating>,
    creator: Option<String>,
    review: Option<String>,
) -> Result<()> {
    let output = &ctx.output;
    let interactive = prompts::can_prompt() && output.is_human();

    let media_type = match media_type {
        Some(media_type) => media_type,
        None if interactive => prompts::prompt_media_type("Type")?,
        None => return Err(missing("--type")),
    };
    let title = match title {
        Some(title) => title,
        None if interactive => prompts::prompt_required("Title", output)?,
        None => return Err(missing("--title")),
    };
    let rating = match rating {
        Some(rating) => rating,
        None if interactive => prompts::prompt_rating("Rating (1-5)", output)?,
        None => return Err(missing("--rating")),
    };
    // Optional fields are only asked for when the required ones were prompted too
    let prompted = interactive && creator.is_none() && review.is_none();
    let creator = if prompted {
        prompts::prompt_optional(&format!("{} (optional)", media_type.creator_label()))?
    } else {
        creator
    };
    let review = if prompted {
        prompts::prompt_optional("Review (optional)")?
    } else {
        review
    };

    let fields = MediaFields {
        media_type,
        title,
        creator,
        rating,
        review,
    }
    .normalized();
    fields.validate()?;

    debug!("Adding {} '{}'", fields.media_type, fields.title);
    let item = ctx.open_lifecycle().create(fields)?;

    if !output.is_human() {
        output.json(&json!({
            "type": "created",
            "item": item
        }));
    }

    Ok(())
}

fn missing(flag: &str) -> color_eyre::Report {
    color_eyre::eyre::eyre!("Missing required {} (no terminal to prompt on)", flag)
}
