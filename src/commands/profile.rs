use crate::cli::{BaseArgs, InitArgs};
use crate::config;
use crate::context::AppContext;
use crate::error::AppResult;
use crate::output::OutputMode;
use crate::profile::Identifier;
use crate::store::ProfileStore;

use super::{ChangeView, ProfileView, describe_auth};

pub fn init(ctx: &AppContext, args: InitArgs) -> AppResult<()> {
    let profile = ctx.open_profile(&args.base)?;
    let view = ProfileView::new(profile.identifier().clone(), profile.record());
    let result = ChangeView::new(view, profile.warnings(), "profile ready");
    profile.close()?;

    let text = format!(
        "{} ({}): {}",
        result.profile.name,
        result.profile.identifier.short(),
        result.profile.base
    );
    ctx.output.emit(&text, &result)
}

pub fn show(ctx: &AppContext) -> AppResult<()> {
    let profile = ctx.load_profile()?;
    let view = ProfileView::new(profile.identifier().clone(), profile.record());
    profile.close()?;

    if ctx.output.mode() == OutputMode::Text {
        println!("{} ({})", view.name, view.identifier.short());
        println!("   base: {}", view.base);
        println!("   auth: {}", describe_auth(view.auth.as_ref()));
        if view.endpoints.is_empty() {
            println!("   endpoints: none");
        } else {
            println!("   endpoints:");
            for (index, endpoint) in view.endpoints.iter().enumerate() {
                println!(
                    "   {}. {} {}",
                    index + 1,
                    endpoint.method.to_ascii_uppercase(),
                    endpoint.path
                );
            }
        }
        return Ok(());
    }

    ctx.output.emit("", &view)
}

pub fn list(ctx: &AppContext) -> AppResult<()> {
    let mut store = ctx.open_store()?;
    let profiles = store
        .list()?
        .into_iter()
        .map(|(identifier, record)| ProfileView::new(identifier, record))
        .collect::<Vec<_>>();
    store.close()?;

    if ctx.output.mode() == OutputMode::Text {
        if profiles.is_empty() {
            println!("0 profiles");
            return Ok(());
        }

        for (index, profile) in profiles.iter().enumerate() {
            let marker = if profile.name == ctx.profile { "*" } else { " " };
            println!(
                "{marker}{}. {} ({}) {} [{} endpoints]",
                index + 1,
                profile.name,
                profile.identifier.short(),
                profile.base,
                profile.endpoints.len()
            );
        }

        return Ok(());
    }

    ctx.output.emit("", &profiles)
}

pub fn remove(ctx: &AppContext) -> AppResult<()> {
    let mut store = ctx.open_store()?;
    let identifier = Identifier::from_name(&ctx.profile);
    let removed = store.remove(&identifier)?;
    store.close()?;

    let text = if removed {
        format!("{}: removed", ctx.profile)
    } else {
        format!("{}: no such profile", ctx.profile)
    };
    ctx.output.emit(
        &text,
        &serde_json::json!({ "profile": ctx.profile, "removed": removed }),
    )
}

pub fn make_default(ctx: &AppContext) -> AppResult<()> {
    let profile = ctx.load_profile()?;
    profile.close()?;

    let mut settings = ctx.settings.clone();
    settings.default_profile = Some(ctx.profile.clone());
    config::save_settings(&ctx.paths, &settings)?;

    let text = format!("{}: now the default profile", ctx.profile);
    ctx.output.emit(&text, &settings)
}

pub fn set_base(ctx: &AppContext, args: BaseArgs) -> AppResult<()> {
    let mut profile = ctx.load_profile()?;
    let warnings = profile.set_base(&args.base)?;
    let view = ProfileView::new(profile.identifier().clone(), profile.record());
    profile.close()?;

    let text = format!("{}: base set to {}", view.name, view.base);
    ctx.output
        .emit(&text, &ChangeView::new(view, &warnings, "base updated"))
}
