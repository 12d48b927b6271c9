use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "site-provisioner")]
#[command(about = "Buy a domain, host its DNS on Cloudflare and serve it from Vercel", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (default: <config dir>/site-provisioner/config.json)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Print results as JSON on stdout
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the full provisioning workflow for a domain
    Provision {
        domain: String,
        /// Registration period in years
        #[arg(short, long, default_value_t = 1)]
        years: u32,
        /// Register without WHOIS privacy
        #[arg(long)]
        no_whois_guard: bool,
        /// Hosting project to attach the domain to (overrides vercel.projectId)
        #[arg(long)]
        project: Option<String>,
    },
    /// Check whether a domain can be registered
    Check { domain: String },
    /// Create the source repository and a hosting project linked to it
    Bootstrap {
        /// Repository and project name
        name: String,
        /// Create the repository as private
        #[arg(long)]
        private: bool,
        /// Provision this domain into the new project right away
        #[arg(long)]
        domain: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_provision_defaults() {
        let cli = Cli::parse_from(["site-provisioner", "provision", "example.com"]);
        assert!(!cli.json);
        match cli.command {
            Command::Provision {
                domain,
                years,
                no_whois_guard,
                project,
            } => {
                assert_eq!(domain, "example.com");
                assert_eq!(years, 1);
                assert!(!no_whois_guard);
                assert!(project.is_none());
            }
            _ => panic!("expected provision"),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "site-provisioner",
            "provision",
            "example.com",
            "--years",
            "2",
            "--no-whois-guard",
            "--json",
            "--config",
            "/tmp/c.json",
        ]);
        assert!(cli.json);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/c.json")));
        assert!(matches!(
            cli.command,
            Command::Provision { years: 2, no_whois_guard: true, .. }
        ));
    }

    #[test]
    fn bootstrap_with_domain() {
        let cli = Cli::parse_from([
            "site-provisioner",
            "bootstrap",
            "my-site",
            "--private",
            "--domain",
            "example.com",
        ]);
        assert!(matches!(
            cli.command,
            Command::Bootstrap { private: true, domain: Some(ref d), .. } if d == "example.com"
        ));
    }

    #[test]
    fn rejects_non_numeric_years() {
        assert!(Cli::try_parse_from(["site-provisioner", "provision", "x.com", "-y", "two"]).is_err());
    }
}
