use std::time::{Duration, Instant};

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use codepad_app_core::{Compositor, FilePreviewSink, RenderOutcome};
use codepad_core::{compose, Document, Project, ProjectSummary, SourceSet};
use codepad_infra::PreviewFile;
use codepad_persistence::atomic_write;
use humansize::{format_size, DECIMAL};
use indicatif::{ProgressBar, ProgressStyle};

use crate::{Session, MARKUP_FILE, SCRIPT_FILE, STYLE_FILE};

fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(msg.to_owned());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

fn write_file(path: &Utf8Path, bytes: &[u8]) -> anyhow::Result<()> {
    atomic_write(path.as_std_path(), bytes).with_context(|| format!("Failed to write {path}"))
}

async fn fetch(session: &Session, id: &str) -> anyhow::Result<Project> {
    let token = session.token()?;
    let pb = spinner(&format!("Fetching project {id}..."));
    let res = session.gateway().fetch_project(&token, id).await;
    pb.finish_and_clear();
    session.check(res)
}

pub async fn cmd_login(session: &Session, email: &str, password: &str) -> anyhow::Result<()> {
    let pb = spinner("Logging in...");
    let res = session.gateway().login(email.trim(), password).await;
    pb.finish_and_clear();

    let token = match res {
        Ok(t) => t,
        Err(e) if e.is_auth_denied() => anyhow::bail!("Invalid email or password"),
        Err(e) => return Err(e.into()),
    };
    session.remember(token)?;
    println!(":: Logged in as {}", email.trim());
    Ok(())
}

pub async fn cmd_register(
    session: &Session,
    username: &str,
    email: &str,
    password: &str,
) -> anyhow::Result<()> {
    let pb = spinner("Registering...");
    let res = session
        .gateway()
        .register(username.trim(), email.trim(), password)
        .await;
    pb.finish_and_clear();
    res?;
    println!(":: Registered {}. Run `login` to start a session.", username.trim());
    Ok(())
}

pub fn cmd_logout(session: &Session) -> anyhow::Result<()> {
    if session.forget()? {
        println!(":: Logged out");
    } else {
        println!(":: Not logged in");
    }
    Ok(())
}

pub async fn cmd_list(
    session: &Session,
    search: Option<&str>,
    json: bool,
) -> anyhow::Result<Vec<ProjectSummary>> {
    let token = session.token()?;
    let pb = spinner("Fetching projects...");
    let res = session.gateway().list_projects(&token).await;
    pb.finish_and_clear();

    let needle = search.unwrap_or_default();
    let projects: Vec<ProjectSummary> = session
        .check(res)?
        .into_iter()
        .filter(|p| p.matches(needle))
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&projects)?);
    } else if projects.is_empty() {
        println!(":: No projects");
    } else {
        println!(":: {} project(s)", projects.len());
        for p in &projects {
            println!("   {:<26} {}", p.id, p.name);
        }
    }
    Ok(projects)
}

pub async fn cmd_create(session: &Session, name: &str) -> anyhow::Result<ProjectSummary> {
    let name = name.trim();
    if name.is_empty() {
        anyhow::bail!("Project name cannot be empty");
    }
    let token = session.token()?;
    let starter = SourceSet::new(
        codepad_config::STARTER_MARKUP,
        codepad_config::STARTER_STYLE,
        codepad_config::STARTER_SCRIPT,
    );

    let pb = spinner("Creating project...");
    let res = session.gateway().create_project(&token, name, &starter).await;
    pb.finish_and_clear();

    let created = session.check(res)?;
    println!(":: Created {} ({})", created.name, created.id);
    Ok(created)
}

pub async fn cmd_show(session: &Session, id: &str) -> anyhow::Result<Project> {
    let project = fetch(session, id).await?;
    println!(":: {} ({})", project.name, project.id);
    for (label, text) in [
        ("HTML", &project.sources.markup),
        ("CSS", &project.sources.style),
        ("JavaScript", &project.sources.script),
    ] {
        println!("\n--- {label} ({})", format_size(text.len() as u64, DECIMAL));
        println!("{text}");
    }
    Ok(project)
}

/// Write a project's three buffers into `dir`.
pub async fn cmd_pull(session: &Session, id: &str, dir: &Utf8Path) -> anyhow::Result<()> {
    let project = fetch(session, id).await?;
    std::fs::create_dir_all(dir).with_context(|| format!("Failed to create {dir}"))?;

    write_file(&dir.join(MARKUP_FILE), project.sources.markup.as_bytes())?;
    write_file(&dir.join(STYLE_FILE), project.sources.style.as_bytes())?;
    write_file(&dir.join(SCRIPT_FILE), project.sources.script.as_bytes())?;
    println!(":: Pulled {} into {dir}", project.name);
    Ok(())
}

/// Read buffers back from a directory laid out by `pull`. Missing files are empty.
pub fn read_sources(dir: &Utf8Path) -> anyhow::Result<SourceSet> {
    let read = |name: &str| -> anyhow::Result<String> {
        let path = dir.join(name);
        match std::fs::read_to_string(&path) {
            Ok(s) => Ok(s),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(String::new()),
            Err(e) => Err(e).with_context(|| format!("Failed to read {path}")),
        }
    };
    Ok(SourceSet::new(
        read(MARKUP_FILE)?,
        read(STYLE_FILE)?,
        read(SCRIPT_FILE)?,
    ))
}

pub async fn cmd_push(session: &Session, id: &str, dir: &Utf8Path) -> anyhow::Result<()> {
    let sources = read_sources(dir)?;
    let token = session.token()?;

    let pb = spinner(&format!("Saving project {id}..."));
    let res = session.gateway().update_project(&token, id, &sources).await;
    pb.finish_and_clear();

    session.check(res)?;
    println!(":: Saved {id} from {dir}");
    Ok(())
}

pub async fn cmd_delete(session: &Session, id: &str, yes: bool) -> anyhow::Result<()> {
    if !yes {
        anyhow::bail!("Refusing to delete {id} without --yes");
    }
    let token = session.token()?;
    let pb = spinner(&format!("Deleting project {id}..."));
    let res = session.gateway().delete_project(&token, id).await;
    pb.finish_and_clear();

    session.check(res)?;
    println!(":: Deleted {id}");
    Ok(())
}

/// Compose a project into one document and write it to `out`
/// (default `code.html` in the working directory).
pub async fn cmd_export(
    session: &Session,
    id: &str,
    out: Option<Utf8PathBuf>,
) -> anyhow::Result<Utf8PathBuf> {
    let project = fetch(session, id).await?;
    let out = out.unwrap_or_else(|| Utf8PathBuf::from(codepad_config::EXPORT_FILE_NAME));
    let document = compose(&project.sources);
    write_file(&out, document.export_bytes())?;
    println!(
        ":: Exported {} to {out} ({})",
        project.name,
        format_size(document.len() as u64, DECIMAL)
    );
    Ok(out)
}

/// Source for `preview`: a stored project or a local directory.
pub enum PreviewSource {
    Project(String),
    Dir(Utf8PathBuf),
}

/// Render through the compositor into a sandboxed preview file and
/// optionally open it in the browser.
pub async fn cmd_preview(
    session: &Session,
    source: PreviewSource,
    out_dir: Option<Utf8PathBuf>,
    open: bool,
) -> anyhow::Result<Document> {
    let sources = match source {
        PreviewSource::Project(id) => fetch(session, &id).await?.sources,
        PreviewSource::Dir(dir) => read_sources(&dir)?,
    };

    let file = match out_dir {
        Some(dir) => PreviewFile::in_dir(dir),
        None => PreviewFile::in_cache_dir()?,
    };
    let url = file.url()?;
    let path = file.path();

    let mut compositor = Compositor::new(FilePreviewSink::new(file), Duration::ZERO);
    let now = Instant::now();
    compositor.replace_sources(sources, now);
    match compositor.poll(now) {
        Some(RenderOutcome::Rendered) => {}
        other => anyhow::bail!("Preview could not be rendered ({other:?})"),
    }
    let document = compositor
        .displayed()
        .cloned()
        .context("Preview rendered but nothing is displayed")?;

    println!(
        ":: Preview written to {path} ({})",
        format_size(document.len() as u64, DECIMAL)
    );
    if open {
        codepad_infra::open_url(&url)?;
        println!(":: Opened {url}");
    } else {
        println!("   {url}");
    }
    Ok(document)
}
