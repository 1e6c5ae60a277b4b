//! `satcon user` - sign in and inspect the current user.

use clap::{Args, ValueEnum};
use satcon_client::Users;

use super::{ConnectionArgs, Context};
use crate::error::{CliResult, required};
use crate::output::print;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum UserAction {
    /// Show the user the credentials belong to
    Me,
    /// Sign in with --login and --password and print the token
    Signin,
}

#[derive(Args, Debug)]
pub struct UserArgs {
    /// Action to perform
    #[arg(short, long, value_enum, default_value = "me")]
    pub action: UserAction,
}

pub async fn run(ctx: &Context, conn: &ConnectionArgs, args: UserArgs) -> CliResult<()> {
    match args.action {
        UserAction::Me => print(&ctx.client.users().me().await?),
        UserAction::Signin => {
            let login = required(conn.login.as_deref(), "--login")?;
            let password = required(conn.password.as_deref(), "--password")?;
            // Sign-in itself is sent without credentials.
            let users = Users::new(ctx.client.endpoint().as_str(), None, None)?;
            print(&users.sign_in(login, password).await?)
        }
    }
}
