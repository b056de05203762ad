//! Organization id lookup command

use serde::Serialize;

use crate::cli::{CommandContext, GlobalOptions, OutputFormat};
use crate::error::Result;
use crate::identity::resolve_organization_id;
use crate::output::json;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OrgIdOutput {
    organization_id: Option<i64>,
}

/// Run the org-id command. Succeeds whether or not an id is found.
pub async fn run(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let organization_id = resolve_organization_id(&ctx.client_ctx).await;

    match ctx.format {
        OutputFormat::Json => {
            println!("{}", json::format_json(&OrgIdOutput { organization_id })?);
        }
        OutputFormat::Pretty => match organization_id {
            Some(id) => println!("{}", id),
            None => println!("none"),
        },
    }

    Ok(())
}
