use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "smth")]
#[command(about = "A terminal client for the newsmth mobile forum", long_about = None)]
pub struct Cli {
    /// Forum account to log in with
    #[arg(requires = "password")]
    pub username: Option<String>,

    /// Password for the account
    pub password: Option<String>,
}

impl Cli {
    /// `(username, password)` when both were given.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) => Some((user.as_str(), pass.as_str())),
            _ => None,
        }
    }
}
