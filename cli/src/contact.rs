use crate::config::StudioConfig;
use crate::print_json;
use studio_catalog::contact::BudgetRange;
use studio_catalog::contact::ContactDesk;
use studio_catalog::contact::ContactForm;
use studio_catalog::contact::JsonlOutbox;
use studio_catalog::contact::LogNotifier;
use studio_catalog::contact::Notifier;
use studio_catalog::contact::ProjectType;

/// CLI for contact intake.
#[derive(Debug, clap::Parser)]
pub struct ContactCli {
    #[command(subcommand)]
    pub cmd: ContactCommand,
}

#[derive(Debug, clap::Subcommand)]
pub enum ContactCommand {
    /// Record an inquiry and hand it to the configured notifier.
    Submit(SubmitArgs),
}

#[derive(Debug, clap::Args)]
pub struct SubmitArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub company: Option<String>,
    /// web, mobile, branding, ui-ux, fintech, vr-ar or other.
    #[arg(long)]
    pub project_type: ProjectType,
    /// under-10k, 10k-25k, 25k-50k, 50k-100k or over-100k.
    #[arg(long)]
    pub budget: BudgetRange,
    #[arg(long)]
    pub message: String,
    #[arg(long)]
    pub timeline: Option<String>,
    #[arg(long = "attachment")]
    pub attachments: Vec<String>,
}

impl From<SubmitArgs> for ContactForm {
    fn from(args: SubmitArgs) -> Self {
        ContactForm {
            name: args.name,
            email: args.email,
            company: args.company,
            project_type: args.project_type,
            budget: args.budget,
            message: args.message,
            timeline: args.timeline,
            attachments: args.attachments,
        }
    }
}

pub fn run(cli: ContactCli, config: &StudioConfig) -> anyhow::Result<()> {
    let notifier: Box<dyn Notifier> = match &config.contact.outbox {
        Some(path) => Box::new(JsonlOutbox::new(path)),
        None => Box::new(LogNotifier),
    };
    let desk = ContactDesk::new(notifier);
    match cli.cmd {
        ContactCommand::Submit(args) => {
            let submission = desk.submit(&args.into())?;
            print_json(&submission)?;
        }
    }
    Ok(())
}
