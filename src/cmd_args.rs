use std::ffi::OsString;

pub use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct ClapArgs {
    /// Profile name
    /// Section of the profile file to read settings from. Default is 'default'.
    /// A missing profile falls back to built-in settings.
    #[clap(short = 'p', long, default_value = "default", help = "profile name")]
    profile: String,

    #[clap(short = 'v', long, help = "write debug-level logs")]
    verbose: bool,

    /// Overrides `base_url` from the profile
    #[clap(long, help = "country API base URL")]
    base_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CommandLineArgs {
    profile: String,
    verbose: bool,
    base_url: Option<String>,
}

impl From<ClapArgs> for CommandLineArgs {
    fn from(args: ClapArgs) -> Self {
        Self {
            profile: args.profile,
            verbose: args.verbose,
            base_url: args.base_url,
        }
    }
}

impl CommandLineArgs {
    pub fn parse() -> Self {
        ClapArgs::parse().into()
    }

    pub fn parse_from<I, T>(itr: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        ClapArgs::parse_from(itr).into()
    }

    pub fn profile(&self) -> &String {
        &self.profile
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }
}
