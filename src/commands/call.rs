use crate::api::find_endpoint;
use crate::cli::CallArgs;
use crate::context::AppContext;
use crate::error::AppResult;

pub async fn run(ctx: &AppContext, args: CallArgs) -> AppResult<()> {
    // Release the store before any network I/O.
    let profile = ctx.load_profile()?;
    let record = profile.record();
    profile.close()?;

    let endpoint = find_endpoint(&record, &args.path, args.method.as_deref())?;
    let response = ctx.api_client.call(&record, endpoint).await?;

    let text = format!(
        "{} {} -> {}\n{}",
        response.method, response.url, response.status, response.body
    );
    ctx.output.emit(&text, &response)
}
