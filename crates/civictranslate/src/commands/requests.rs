//! Translation request command handlers.

use std::sync::Arc;

use tabled::Tabled;

use civictranslate_core::{Dashboard, NewRequest, RequestFilter, TranslationRequest};

use crate::cli::{GlobalOpts, RequestsArgs, RequestsCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct RequestRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Languages")]
    languages: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Priority")]
    priority: String,
    #[tabled(rename = "Requested By")]
    created_by: String,
    #[tabled(rename = "Updated")]
    updated: String,
}

impl RequestRow {
    fn new(r: &TranslationRequest, color: bool) -> Self {
        Self {
            id: r.id.to_string(),
            title: r.title.clone(),
            languages: format!("{} → {}", r.source_language, r.target_language),
            status: output::status_label(r.status, color),
            priority: output::priority_label(r.priority, color),
            created_by: r.created_by.clone(),
            updated: r.updated_at.to_string(),
        }
    }
}

fn detail(r: &Arc<TranslationRequest>, color: bool) -> String {
    let mut lines = vec![
        format!("ID:           {}", r.id),
        format!("Title:        {}", r.title),
        format!("Languages:    {} → {}", r.source_language, r.target_language),
        format!("Status:       {}", output::status_label(r.status, color)),
        format!("Priority:     {}", output::priority_label(r.priority, color)),
        format!("Requested by: {}", r.created_by),
        format!("Created:      {}", r.created_at),
        format!("Updated:      {}", r.updated_at),
    ];
    if !r.description.is_empty() {
        lines.push(String::new());
        lines.push(r.description.clone());
    }
    lines.join("\n")
}

fn render_one(r: &Arc<TranslationRequest>, global: &GlobalOpts) -> String {
    let color = output::global_color(global);
    output::render_single(global.output, r, |r| detail(r, color), |r| r.id.to_string())
}

fn non_blank(field: &str, value: String) -> Result<String, CliError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CliError::Validation {
            field: field.into(),
            reason: "must not be empty".into(),
        });
    }
    Ok(trimmed.to_owned())
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    dashboard: &Dashboard,
    args: RequestsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let store = dashboard.store();

    match args.command {
        RequestsCommand::List {
            status,
            priority,
            search,
        } => {
            let mut filter = RequestFilter::default();
            if let Some(s) = status {
                filter = filter.with_status(s);
            }
            if let Some(p) = priority {
                filter = filter.with_priority(p);
            }
            if let Some(text) = search {
                filter = filter.with_search(text);
            }

            let color = output::global_color(global);
            let matches = store.filter(&filter);
            let out = output::render_list(
                global.output,
                &matches,
                |r| RequestRow::new(r, color),
                |r| r.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        RequestsCommand::Get { id } => {
            let found = util::find_request(dashboard, &id)?;
            output::print_output(&render_one(&found, global), global.quiet);
            Ok(())
        }

        RequestsCommand::Create {
            title,
            source_language,
            target_language,
            priority,
            description,
        } => {
            let created_by = dashboard
                .session()
                .current_user()
                .map(|u| u.name.clone())
                .unwrap_or_default();
            let fields = NewRequest {
                title: non_blank("title", title)?,
                source_language: non_blank("from", source_language)?,
                target_language: non_blank("to", target_language)?,
                priority,
                description: description.trim().to_owned(),
                created_by,
            };

            let bar = output::spinner("Submitting request...", global);
            let result = store.create_request(fields).await;
            bar.finish_and_clear();

            let created = result?;
            output::print_output(&render_one(&created, global), global.quiet);
            Ok(())
        }

        RequestsCommand::SetStatus { id, status } => {
            let target = util::find_request(dashboard, &id)?;

            let bar = output::spinner("Updating status...", global);
            let result = store.update_status(&target.id, status).await;
            bar.finish_and_clear();

            let updated = result?;
            output::print_output(&render_one(&updated, global), global.quiet);
            Ok(())
        }

        RequestsCommand::Delete { id } => {
            util::require_admin(dashboard, "requests delete")?;
            let target = util::find_request(dashboard, &id)?;

            let prompt = format!("Delete {} \"{}\"?", target.id, target.title);
            if !util::confirm(&prompt, "requests delete", global.yes)? {
                return Ok(());
            }

            let bar = output::spinner("Deleting request...", global);
            let result = store.delete_request(&target.id).await;
            bar.finish_and_clear();

            let ack = result?;
            let out = output::render_single(
                global.output,
                &ack,
                |_| format!("Deleted {}", target.id),
                |_| target.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
