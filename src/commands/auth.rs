use crate::cli::AuthArgs;
use crate::context::AppContext;
use crate::error::AppResult;
use crate::profile::AuthParams;

use super::{ChangeView, ProfileView, describe_auth};

pub fn run(ctx: &AppContext, args: AuthArgs) -> AppResult<()> {
    let params = args.params.into_iter().collect::<AuthParams>();

    let mut profile = ctx.load_profile()?;
    profile.set_auth(&args.method, params)?;
    let view = ProfileView::new(profile.identifier().clone(), profile.record());
    profile.close()?;

    let text = format!("{}: auth set to {}", view.name, describe_auth(view.auth.as_ref()));
    ctx.output
        .emit(&text, &ChangeView::new(view, &[], "auth updated"))
}
