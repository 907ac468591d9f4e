use super::StepArg;
use anyhow::{Context, Result, bail};
use intake_application::IntakeApp;
use intake_application::wizard::SummaryOutcome;
use intake_core::persona::Persona;
use intake_core::report::ReportExporter;
use intake_core::round::{Round3Data, RoundData, RoundKind};
use intake_core::session::WizardStep;
use intake_infrastructure::MarkdownReportExporter;
use intake_infrastructure::image_processing::DataUrl;
use std::path::{Path, PathBuf};

fn read_payload<T: serde::de::DeserializeOwned>(file: &Path) -> Result<T> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Invalid payload in {}", file.display()))
}

/// Generates options and prints the resulting draft as JSON.
///
/// Edit `selectedConfigIds` and `comment` in the output, then pass it to
/// `intake apply --step round<N>`.
pub async fn generate(app: &IntakeApp, id: &str, round: u8, keywords: Vec<String>) -> Result<()> {
    let kind = match round {
        1 => RoundKind::Functional,
        _ => RoundKind::Interaction,
    };
    let wizard = app.resume(id).await?;
    let session = wizard.session().await?;
    let existing = match kind {
        RoundKind::Functional => session.round1,
        RoundKind::Interaction => session.round2,
    };
    // A stored round keeps its keywords; start a fresh draft for new ones
    let draft = if existing.selected_keywords == keywords {
        existing
    } else {
        RoundData::default()
    };

    let draft = wizard.generate_options(kind, draft, keywords).await?;
    println!("{}", serde_json::to_string_pretty(&draft)?);
    Ok(())
}

pub async fn concepts(
    app: &IntakeApp,
    id: &str,
    style: &str,
    reference: Option<PathBuf>,
) -> Result<()> {
    let reference = match reference {
        Some(path) => {
            let bytes = std::fs::read(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let mime = match path.extension().and_then(|ext| ext.to_str()) {
                Some("png") => "image/png",
                Some("webp") => "image/webp",
                _ => "image/jpeg",
            };
            Some(DataUrl::encode(mime, &bytes))
        }
        None => None,
    };

    let wizard = app.resume(id).await?;
    let images = wizard.generate_concepts(style, reference).await?;
    println!("{}", serde_json::to_string_pretty(&images)?);
    Ok(())
}

pub async fn apply(app: &IntakeApp, id: &str, step: StepArg, file: &Path) -> Result<()> {
    let wizard = app.resume(id).await?;
    let step = WizardStep::from(step);

    match step {
        WizardStep::Setup => {
            wizard.complete_setup(read_payload::<Persona>(file)?).await?;
        }
        WizardStep::Round1 => {
            wizard.complete_round1(read_payload::<RoundData>(file)?).await?;
        }
        WizardStep::Round2 => {
            wizard.complete_round2(read_payload::<RoundData>(file)?).await?;
        }
        _ => {
            let completion = wizard
                .complete_round3(read_payload::<Round3Data>(file)?)
                .await?;
            println!("Session {} completed, generating summary...", completion.session.id);
            match completion.summary_job.await? {
                SummaryOutcome::Attached => println!("Summary attached."),
                SummaryOutcome::Failed(e) => bail!("Failed to save summary: {}", e),
                outcome => println!("Summary not attached: {:?}", outcome),
            }
        }
    }

    println!("next: {}", wizard.current_step().await);
    Ok(())
}

pub async fn summarize(app: &IntakeApp, id: &str, force: bool) -> Result<()> {
    let wizard = app.resume(id).await?;
    let summary = if force {
        wizard.regenerate_summary().await?
    } else {
        wizard.ensure_summary().await?
    };
    println!("{}", summary);
    Ok(())
}

pub async fn export(app: &IntakeApp, id: &str, out: Option<PathBuf>) -> Result<()> {
    let wizard = app.resume(id).await?;
    let report = wizard.open_summary().await?;

    let exported = match out {
        Some(dir) => MarkdownReportExporter::new(dir).export(&report).await?,
        None => wizard.export_report().await?,
    };
    println!(
        "Wrote {} ({} bytes)",
        exported.path.display(),
        exported.bytes_written
    );
    Ok(())
}
