use crate::cli::{EndpointAddArgs, EndpointCommand};
use crate::context::AppContext;
use crate::error::AppResult;
use crate::output::OutputMode;

use super::{ChangeView, ProfileView};

pub fn run(ctx: &AppContext, command: EndpointCommand) -> AppResult<()> {
    match command {
        EndpointCommand::Add(args) => add(ctx, args),
        EndpointCommand::Ls => list(ctx),
    }
}

fn add(ctx: &AppContext, args: EndpointAddArgs) -> AppResult<()> {
    let mut profile = ctx.load_profile()?;
    let warnings = profile.add_endpoint(&args.path, &args.method)?;
    let view = ProfileView::new(profile.identifier().clone(), profile.record());
    profile.close()?;

    let text = format!(
        "{}: added {} {} ({} endpoints)",
        view.name,
        args.method.to_ascii_uppercase(),
        args.path,
        view.endpoints.len()
    );
    ctx.output
        .emit(&text, &ChangeView::new(view, &warnings, "endpoint added"))
}

fn list(ctx: &AppContext) -> AppResult<()> {
    let profile = ctx.load_profile()?;
    let endpoints = profile.endpoints().to_vec();
    profile.close()?;

    if ctx.output.mode() == OutputMode::Text {
        if endpoints.is_empty() {
            println!("0 endpoints");
            return Ok(());
        }

        for (index, endpoint) in endpoints.iter().enumerate() {
            println!(
                "{}. {} {}",
                index + 1,
                endpoint.method.to_ascii_uppercase(),
                endpoint.path
            );
        }

        return Ok(());
    }

    ctx.output.emit("", &endpoints)
}
