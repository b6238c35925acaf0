use std::sync::Arc;

use anyhow::{Context, bail};
use cherry_api::{ApiConfig, HttpUserApi, User, UserId, tracing::init_tracing};
use cherry_store::{
    Navigation, Route, UserForm, UserStore,
    pages::{App, Page, SubmitOutcome},
};
use clap::{Args, Parser, Subcommand};

/// Manage users of the cherry users API
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Base URL of the users resource
    #[arg(long, env = "CHERRY_API_URL")]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List all users
    List,
    /// Show one user
    Show { id: UserId },
    /// Edit a user; unspecified fields keep their current value
    Edit {
        id: UserId,
        #[command(flatten)]
        fields: FieldArgs,
    },
    /// Create a user
    Create {
        #[command(flatten)]
        fields: FieldArgs,
    },
    /// Delete a user
    Delete { id: UserId },
    /// Open a page by path, e.g. `/users/edit/3`
    Open { path: String },
}

#[derive(Debug, Args)]
struct FieldArgs {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    email: Option<String>,
    /// admin, user or guest
    #[arg(long)]
    category: Option<String>,
}

impl FieldArgs {
    fn apply(self, form: &mut UserForm) {
        if let Some(name) = self.name {
            form.name = name;
        }
        if let Some(email) = self.email {
            form.email = email;
        }
        if let Some(category) = self.category {
            form.category = category;
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = ApiConfig::from_env().context("failed to read configuration")?;
    if let Some(api_url) = cli.api_url {
        config.api_url = api_url;
    }
    init_tracing(config.env);
    tracing::debug!(api_url = %config.api_url, command = ?cli.command, "Starting");

    let store = Arc::new(UserStore::new(HttpUserApi::new(config.api_url)));
    let mut app = App::start(store.clone()).await;

    match cli.command {
        Command::List => app.navigate(Route::Users).await,
        Command::Show { id } => app.navigate(Route::UserEdit(id)).await,
        Command::Open { path } => app.navigate(path.parse()?).await,
        Command::Edit { id, fields } => {
            app.navigate(Route::UserEdit(id)).await;
            if let Some(error) = store.error() {
                bail!(error);
            }
            if let Page::Edit(editor) = app.page_mut() {
                fields.apply(editor.form_mut());
            }
            submit(&mut app).await?;
        }
        Command::Create { fields } => {
            app.navigate(Route::UserCreate).await;
            if let Page::Create(creator) = app.page_mut() {
                fields.apply(creator.form_mut());
            }
            submit(&mut app).await?;
        }
        Command::Delete { id } => {
            store.delete_user(id).await;
            app.navigate(Route::Users).await;
        }
    }

    if let Some(error) = store.error() {
        bail!(error);
    }
    render(&app);
    Ok(())
}

async fn submit(app: &mut App<HttpUserApi>) -> anyhow::Result<()> {
    match app.submit().await {
        Some(SubmitOutcome::Invalid(errors)) => bail!("invalid input: {errors}"),
        Some(SubmitOutcome::Failed(error)) => bail!(error),
        Some(SubmitOutcome::Navigate(_)) | None => Ok(()),
    }
}

fn render(app: &App<HttpUserApi>) {
    match app.page() {
        Page::Home => {
            for (label, route) in Navigation::LINKS {
                println!("{label:<10} {route}");
            }
        }
        Page::Users(_) => {
            for user in app.store().users() {
                print_row(&user);
            }
        }
        Page::Create(creator) => print_form(0, creator.form()),
        Page::Edit(editor) => print_form(editor.working_id(), editor.form()),
    }
}

fn print_row(user: &User) {
    println!(
        "{:>5}  {:<24} {:<32} {}",
        user.id, user.name, user.email, user.category
    );
}

fn print_form(id: UserId, form: &UserForm) {
    println!("id:       {id}");
    println!("name:     {}", form.name);
    println!("email:    {}", form.email);
    println!("category: {}", form.category);
}
