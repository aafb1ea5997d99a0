use crate::cli::{Cli, Command};
use crate::commands;
use crate::context::AppContext;
use crate::error::AppResult;
use crate::store::StoreTarget;

pub async fn run(cli: Cli) -> AppResult<()> {
    let Cli {
        profile,
        test,
        store,
        json,
        verbose: _,
        command,
    } = cli;

    let target = StoreTarget::from_flags(test, store);
    let ctx = AppContext::bootstrap(profile, target, json)?;
    dispatch(&ctx, command).await
}

pub async fn dispatch(ctx: &AppContext, command: Command) -> AppResult<()> {
    match command {
        Command::Init(args) => commands::profile::init(ctx, args),
        Command::Show => commands::profile::show(ctx),
        Command::List => commands::profile::list(ctx),
        Command::Rm => commands::profile::remove(ctx),
        Command::Use => commands::profile::make_default(ctx),
        Command::Base(args) => commands::profile::set_base(ctx, args),
        Command::Auth(args) => commands::auth::run(ctx, args),
        Command::Endpoint(args) => commands::endpoint::run(ctx, args.command),
        Command::Call(args) => commands::call::run(ctx, args).await,
    }
}
