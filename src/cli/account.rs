//! Backend commands: auth, profile, onboarding, jobs, journey

use anyhow::{Context, Result};
use clap::Subcommand;
use std::io::{BufRead, Write};

use pearl::api::{ApiError, JourneyRequest, OnboardingRequest};

use super::context::AppContext;

#[derive(Subcommand)]
pub enum AuthCommand {
    /// Sign in with email and password
    Signin {
        email: String,
        /// Read from stdin when omitted
        #[arg(long)]
        password: Option<String>,
    },
    /// Create an account
    Signup {
        email: String,
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: Option<String>,
    },
    /// Sign out and forget saved tokens
    Signout,
    /// Show the signed-in user
    Me,
}

#[derive(Subcommand)]
pub enum OnboardingCommand {
    /// Show onboarding progress
    Status,
    /// Submit onboarding answers
    Start {
        /// Primary career goal
        #[arg(long)]
        goal: String,
        #[arg(long)]
        target_role: String,
        /// Comma-separated skills
        #[arg(long, value_delimiter = ',')]
        skills: Vec<String>,
        #[arg(long)]
        short_term_goal: Option<String>,
        #[arg(long)]
        free_only: bool,
    },
}

/// Turn an expired session into a sign-in prompt
fn explain(e: ApiError) -> anyhow::Error {
    match e {
        ApiError::ReauthRequired | ApiError::NotAuthenticated => {
            anyhow::anyhow!("{e}\nRun `pearl auth signin <email>` to continue.")
        }
        other => other.into(),
    }
}

fn read_password(given: Option<String>) -> Result<String> {
    if let Some(p) = given {
        return Ok(p);
    }
    print!("Password: ");
    std::io::stdout().flush().context("Failed to flush stdout")?;
    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read password")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn print_json(value: &impl serde::Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn auth_command(ctx: &AppContext, command: AuthCommand) -> Result<()> {
    let mut session = ctx.auth();
    match command {
        AuthCommand::Signin { email, password } => {
            let password = read_password(password)?;
            let user = session.signin(&email, &password).map_err(explain)?;
            println!("Signed in as {} ({})", user.username, user.email);
        }
        AuthCommand::Signup {
            email,
            username,
            password,
        } => {
            let password = read_password(password)?;
            let user = session
                .signup(&email, &password, &username)
                .map_err(explain)?;
            println!("Account created for {} ({})", user.username, user.email);
        }
        AuthCommand::Signout => {
            if let Err(e) = session.signout() {
                tracing::warn!("Backend sign-out failed: {}", e);
            }
            println!("Signed out.");
        }
        AuthCommand::Me => {
            let user = session.me().map_err(explain)?;
            println!("{} <{}>", user.username, user.email);
            println!("id: {}", user.id);
        }
    }
    Ok(())
}

pub fn profile_command(ctx: &AppContext) -> Result<()> {
    let mut session = ctx.auth();
    let user_id = session.user_id().map_err(explain)?.to_string();
    let profile = session.call(|c| c.profile(&user_id)).map_err(explain)?;
    print_json(&profile)
}

pub fn skills_command(ctx: &AppContext) -> Result<()> {
    let mut session = ctx.auth();
    let user_id = session.user_id().map_err(explain)?.to_string();
    let skills = session.call(|c| c.skills(&user_id)).map_err(explain)?;

    if skills.is_empty() {
        println!("No skills recorded.");
        return Ok(());
    }
    for skill in skills {
        match skill.level {
            Some(level) => println!("  {} ({})", skill.name, level),
            None => println!("  {}", skill.name),
        }
    }
    Ok(())
}

pub fn onboarding_command(ctx: &AppContext, command: OnboardingCommand) -> Result<()> {
    let mut session = ctx.auth();
    match command {
        OnboardingCommand::Status => {
            let status = session.call(|c| c.onboarding_status()).map_err(explain)?;
            let progress = status.onboarding;
            if progress.completed {
                println!("Onboarding complete.");
            } else {
                println!("Onboarding step {}/{}", progress.step, progress.total_steps);
            }
        }
        OnboardingCommand::Start {
            goal,
            target_role,
            skills,
            short_term_goal,
            free_only,
        } => {
            let mut request = OnboardingRequest::new(goal, target_role);
            request.skills = skills;
            request.short_term_goal = short_term_goal;
            request.constraint_free_only = free_only;
            let resp = session
                .call(|c| c.submit_onboarding(&request))
                .map_err(explain)?;
            print_json(&resp)?;
        }
    }
    Ok(())
}

pub fn jobs_command(
    ctx: &AppContext,
    target_role: Option<String>,
    skills: Vec<String>,
    location: Option<String>,
) -> Result<()> {
    let location = location.unwrap_or_else(|| ctx.config.api.job_location.clone());
    let mut session = ctx.auth();
    let jobs = session
        .call(|c| c.job_recommendations(target_role.as_deref(), &skills, &location))
        .map_err(explain)?;

    if jobs.is_empty() {
        println!("No jobs found near {}.", location);
        return Ok(());
    }
    println!("Jobs ({}):\n", jobs.len());
    for job in jobs {
        match job.match_score {
            Some(score) => println!("  {} @ {} [{:.0}% match]", job.title, job.company, score),
            None => println!("  {} @ {}", job.title, job.company),
        }
        if !job.location.is_empty() {
            println!("    {}", job.location);
        }
        if !job.url.is_empty() {
            println!("    {}", job.url);
        }
    }
    Ok(())
}

pub fn journey_command(ctx: &AppContext, goal: String, jd_text: Option<String>) -> Result<()> {
    let mut session = ctx.auth();
    let user_id = session.user_id().map_err(explain)?.to_string();
    let request = JourneyRequest {
        goal,
        user_id,
        jd_text,
    };
    let journey = session.call(|c| c.start_journey(&request)).map_err(explain)?;

    println!("Journey {} started", journey.session_id);
    if let Some(role) = &journey.target_role {
        println!("Target role: {}", role);
    }
    if !journey.skills_to_learn.is_empty() {
        println!("Skills to learn: {}", journey.skills_to_learn.join(", "));
    }
    println!(
        "{} modules, about {:.0} hours",
        journey.total_modules, journey.estimated_hours
    );
    Ok(())
}

pub fn health_command(ctx: &AppContext) -> Result<()> {
    let client = ctx.client();
    if client.health() {
        println!("Backend at {} is up.", client.base_url());
    } else {
        println!("Backend at {} is unreachable.", client.base_url());
    }
    Ok(())
}
