use anyhow::{Result, bail};
use intake_application::IntakeApp;
use intake_core::session::gate::{reachable_steps, resume_step};

pub async fn list(app: &IntakeApp) -> Result<()> {
    let sessions = app.store().list().await;
    if sessions.is_empty() {
        println!("No sessions yet. Create one with `intake new`.");
        return Ok(());
    }

    for session in sessions {
        println!(
            "{}  {:<12} {:<20} {}  next: {}",
            session.short_id(),
            session.status,
            session.name,
            session.updated_at.format("%Y-%m-%d %H:%M"),
            resume_step(&session)
        );
        println!("        {}", session.id);
    }
    Ok(())
}

pub async fn create(app: &IntakeApp, name: Option<String>) -> Result<()> {
    let wizard = app.new_wizard().await?;
    if let Some(name) = name {
        app.store()
            .patch(wizard.session_id(), |session| session.name = name)
            .await?;
    }
    println!("{}", wizard.session_id());
    Ok(())
}

pub async fn show(app: &IntakeApp, id: &str) -> Result<()> {
    let session = app.store().require(id).await?;
    let persona = &session.persona;

    println!("{} ({})", session.name, session.id);
    println!("status:   {}", session.status);
    println!("created:  {}", session.created_at.to_rfc3339());
    println!("updated:  {}", session.updated_at.to_rfc3339());
    if let Some(headline) = persona.headline() {
        println!("persona:  {}", headline);
    }

    for (label, round) in [("round1", &session.round1), ("round2", &session.round2)] {
        let titles: Vec<&str> = round
            .selected_options()
            .into_iter()
            .map(|option| option.title.as_str())
            .collect();
        println!(
            "{}:   keywords [{}] selected [{}]",
            label,
            round.selected_keywords.join(", "),
            titles.join(", ")
        );
    }

    println!(
        "round3:   {} image(s), selected {:?}",
        session.round3.generated_images.len(),
        session.round3.selected_image_index
    );
    match session.ai_summary.as_deref() {
        Some(summary) => println!("\n{}", summary),
        None => println!("\n(no summary)"),
    }
    Ok(())
}

pub async fn resume(app: &IntakeApp, id: &str) -> Result<()> {
    let wizard = app.resume(id).await?;
    let session = wizard.session().await?;
    let reachable: Vec<String> = reachable_steps(&session)
        .into_iter()
        .map(|step| step.to_string())
        .collect();

    println!("resume at: {}", wizard.current_step().await);
    println!("reachable: {}", reachable.join(", "));
    Ok(())
}

pub async fn delete(app: &IntakeApp, id: &str, yes: bool) -> Result<()> {
    if !yes {
        bail!("Refusing to delete {} without --yes", id);
    }
    if !app.store().delete(id).await? {
        bail!("Session {} not found", id);
    }
    println!("Deleted {}", id);
    Ok(())
}
