mod telemetry;

use anyhow::{bail, Context};
use pollemic_core::{
    execute, submit_draft, ListActiveGroupsUseCase, ListScheduledSurveysUseCase,
    LoadReferenceDataUseCase, PollemicError, ScheduleDraftStore, SubmissionReceipt, SurveySource,
};
use pollemic_domain::{validate, ScheduleDraft};
use pollemic_infra::{setup_context, PollemicContext};
use std::path::Path;
use telemetry::{get_subscriber, init_subscriber};

const USAGE: &str = "Usage: pollemic <command>

Commands:
    validate <draft.json>    Validate a schedule draft against the current time
    submit <draft.json>      Validate and submit a schedule draft
    surveys [--latest]       List surveys that can be scheduled
    groups                   List active student groups
    assignments              List scheduled surveys";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = get_subscriber("pollemic".into(), "warn".into());
    init_subscriber(subscriber);

    let args: Vec<String> = std::env::args().skip(1).collect();
    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    let ctx = setup_context();

    match args.as_slice() {
        ["validate", path] => validate_draft(&ctx, path).await,
        ["submit", path] => submit(&ctx, path).await,
        ["surveys"] => list_surveys(&ctx, SurveySource::All).await,
        ["surveys", "--latest"] => list_surveys(&ctx, SurveySource::Latest).await,
        ["groups"] => list_groups(&ctx).await,
        ["assignments"] => list_assignments(&ctx).await,
        _ => {
            eprintln!("{}", USAGE);
            bail!("Unknown command: {}", args.join(" "))
        }
    }
}

async fn read_draft(path: &str) -> anyhow::Result<ScheduleDraft> {
    let raw = tokio::fs::read_to_string(Path::new(path))
        .await
        .with_context(|| format!("Could not read draft file {}", path))?;
    serde_json::from_str(&raw).with_context(|| format!("{} is not a valid schedule draft", path))
}

async fn validate_draft(ctx: &PollemicContext, path: &str) -> anyhow::Result<()> {
    let draft = read_draft(path).await?;
    let result = validate(&draft, ctx.now());
    println!("{}", serde_json::to_string_pretty(&result)?);
    match result.summary() {
        None => Ok(()),
        Some(summary) => bail!(summary),
    }
}

async fn submit(ctx: &PollemicContext, path: &str) -> anyhow::Result<()> {
    let draft = read_draft(path).await?;
    let store = ScheduleDraftStore::with_draft(ctx.sys.clone(), ctx.config.timezone, draft);

    match submit_draft(&store, ctx).await {
        Ok(SubmissionReceipt::Assigned {
            questionnaire_id,
            group_ids,
            ..
        }) => {
            println!(
                "Questionnaire {} assigned to {} group(s)",
                questionnaire_id,
                group_ids.len()
            );
            Ok(())
        }
        Ok(SubmissionReceipt::Scheduled {
            schedule_id,
            message,
        }) => {
            match schedule_id {
                Some(id) => println!("Schedule {} created", id),
                None => println!("Schedule created"),
            }
            if let Some(message) = message {
                println!("{}", message);
            }
            Ok(())
        }
        Err(PollemicError::InvalidDraft(summary)) => {
            println!("{}", serde_json::to_string_pretty(&store.errors())?);
            bail!(summary)
        }
        Err(e) => Err(e.into()),
    }
}

async fn list_surveys(ctx: &PollemicContext, source: SurveySource) -> anyhow::Result<()> {
    let usecase = LoadReferenceDataUseCase {
        source,
        limit: None,
    };
    let data = execute(usecase, ctx).await.map_err(PollemicError::from)?;
    for survey in data.surveys {
        println!(
            "{}\t{}\t{} question(s)",
            survey.id,
            survey.title,
            survey.questions.len()
        );
    }
    Ok(())
}

async fn list_groups(ctx: &PollemicContext) -> anyhow::Result<()> {
    let groups = execute(ListActiveGroupsUseCase, ctx)
        .await
        .map_err(PollemicError::from)?;
    for group in groups {
        println!("{}\t{}", group.id, group.title);
    }
    Ok(())
}

async fn list_assignments(ctx: &PollemicContext) -> anyhow::Result<()> {
    let rows = match execute(ListScheduledSurveysUseCase, ctx).await {
        Ok(rows) => rows,
        Err(never) => match never {},
    };
    for row in rows {
        println!(
            "{}\t{}\t{}\t{}\t{}\t{:?}",
            row.id, row.name, row.date, row.recurrence, row.target, row.status
        );
    }
    Ok(())
}
