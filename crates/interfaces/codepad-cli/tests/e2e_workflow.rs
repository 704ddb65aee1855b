use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use camino::Utf8PathBuf;
use codepad_cli::commands::{self, PreviewSource};
use codepad_cli::{Session, MARKUP_FILE, STYLE_FILE};
use codepad_infra::preview::{DOCUMENT_FILE, HOST_FILE};
use codepad_persistence::FileClientStore;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tempfile::tempdir;

const TOKEN: &str = "tok-e2e";

#[derive(Clone, Default)]
struct Store {
    projects: Arc<Mutex<BTreeMap<String, Value>>>,
    next_id: Arc<Mutex<u32>>,
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == TOKEN)
}

async fn start_mock_store() -> (SocketAddr, tokio::task::JoinHandle<()>) {
    let app = Router::new()
        .route(
            "/login",
            post(|Json(body): Json<Value>| async move {
                if body["password"] == "secret" {
                    (StatusCode::OK, Json(json!({ "token": TOKEN })))
                } else {
                    (StatusCode::UNAUTHORIZED, Json(json!({})))
                }
            }),
        )
        .route(
            "/projects",
            get(|State(store): State<Store>, headers: HeaderMap| async move {
                if !authorized(&headers) {
                    return (StatusCode::FORBIDDEN, Json(json!([])));
                }
                let list: Vec<Value> = store
                    .projects
                    .lock()
                    .unwrap()
                    .values()
                    .map(|p| json!({ "_id": p["_id"], "name": p["name"] }))
                    .collect();
                (StatusCode::OK, Json(Value::Array(list)))
            }),
        )
        .route(
            "/project",
            post(
                |State(store): State<Store>, headers: HeaderMap, Json(mut body): Json<Value>| async move {
                    if !authorized(&headers) {
                        return (StatusCode::FORBIDDEN, Json(json!({})));
                    }
                    let id = {
                        let mut next = store.next_id.lock().unwrap();
                        *next += 1;
                        format!("p{next}")
                    };
                    body["_id"] = json!(id);
                    store.projects.lock().unwrap().insert(id, body.clone());
                    (StatusCode::OK, Json(body))
                },
            ),
        )
        .route(
            "/project/:id",
            get(
                |State(store): State<Store>, headers: HeaderMap, Path(id): Path<String>| async move {
                    if !authorized(&headers) {
                        return (StatusCode::FORBIDDEN, Json(json!({})));
                    }
                    match store.projects.lock().unwrap().get(&id) {
                        Some(p) => (StatusCode::OK, Json(p.clone())),
                        None => (StatusCode::NOT_FOUND, Json(json!({}))),
                    }
                },
            )
            .put(
                |State(store): State<Store>,
                 headers: HeaderMap,
                 Path(id): Path<String>,
                 Json(body): Json<Value>| async move {
                    if !authorized(&headers) {
                        return StatusCode::FORBIDDEN;
                    }
                    let mut projects = store.projects.lock().unwrap();
                    let Some(p) = projects.get_mut(&id) else {
                        return StatusCode::NOT_FOUND;
                    };
                    for key in ["htmlCode", "cssCode", "jsCode"] {
                        p[key] = body[key].clone();
                    }
                    StatusCode::OK
                },
            )
            .delete(
                |State(store): State<Store>, headers: HeaderMap, Path(id): Path<String>| async move {
                    if !authorized(&headers) {
                        return StatusCode::FORBIDDEN;
                    }
                    match store.projects.lock().unwrap().remove(&id) {
                        Some(_) => StatusCode::OK,
                        None => StatusCode::NOT_FOUND,
                    }
                },
            ),
        )
        .with_state(Store::default());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (addr, handle)
}

fn utf8(path: &std::path::Path) -> Utf8PathBuf {
    Utf8PathBuf::from_path_buf(path.to_path_buf()).unwrap()
}

#[tokio::test]
async fn full_project_workflow() {
    let (addr, server) = start_mock_store().await;
    let config = tempdir().unwrap();
    let work = tempdir().unwrap();
    let work_dir = utf8(work.path());

    let session = Session::new(
        &format!("http://{addr}"),
        FileClientStore::in_dir(&utf8(config.path())),
    )
    .unwrap();

    // Phase 1: nothing works before login
    let err = commands::cmd_list(&session, None, false).await.unwrap_err();
    assert!(err.to_string().contains("Not logged in"), "{err}");

    let err = commands::cmd_login(&session, "ada@example.com", "nope")
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Invalid email or password"));

    commands::cmd_login(&session, "ada@example.com", "secret")
        .await
        .expect("login");
    assert_eq!(session.token().unwrap(), TOKEN);

    // Phase 2: create from the starter template and find it again
    let created = commands::cmd_create(&session, "Landing Page").await.unwrap();
    commands::cmd_create(&session, "Todo").await.unwrap();

    let found = commands::cmd_list(&session, Some("landing"), false)
        .await
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, created.id);

    // Phase 3: pull, edit locally, push back
    let checkout = work_dir.join("landing");
    commands::cmd_pull(&session, &created.id, &checkout)
        .await
        .unwrap();
    let markup = std::fs::read_to_string(checkout.join(MARKUP_FILE)).unwrap();
    assert!(markup.contains("<h1>Hello!</h1>"));

    std::fs::write(checkout.join(MARKUP_FILE), "<h1>Hi</h1>").unwrap();
    std::fs::write(checkout.join(STYLE_FILE), "h1{color:red}").unwrap();
    std::fs::remove_file(checkout.join(codepad_cli::SCRIPT_FILE)).unwrap();
    commands::cmd_push(&session, &created.id, &checkout)
        .await
        .unwrap();

    // Phase 4: export and preview produce the same composed document
    let exported = commands::cmd_export(&session, &created.id, Some(work_dir.join("out.html")))
        .await
        .unwrap();
    let written = std::fs::read_to_string(&exported).unwrap();
    assert_eq!(
        written,
        "<h1>Hi</h1><style>h1{color:red}</style><script></script>"
    );

    let preview_dir = work_dir.join("preview");
    let shown = commands::cmd_preview(
        &session,
        PreviewSource::Project(created.id.clone()),
        Some(preview_dir.clone()),
        false,
    )
    .await
    .unwrap();
    assert_eq!(shown.as_str(), written);
    assert_eq!(
        std::fs::read_to_string(preview_dir.join(DOCUMENT_FILE)).unwrap(),
        written
    );
    let host = std::fs::read_to_string(preview_dir.join(HOST_FILE)).unwrap();
    assert!(host.contains(r#"<iframe id="preview" sandbox="allow-scripts""#));

    // Phase 5: delete needs confirmation
    assert!(commands::cmd_delete(&session, &created.id, false)
        .await
        .is_err());
    commands::cmd_delete(&session, &created.id, true)
        .await
        .unwrap();
    let rest = commands::cmd_list(&session, None, false).await.unwrap();
    assert_eq!(rest.len(), 1);
    assert_eq!(rest[0].name, "Todo");

    commands::cmd_logout(&session).unwrap();
    assert!(session.token().is_err());

    server.abort();
}

#[tokio::test]
async fn revoked_token_is_forgotten() {
    let (addr, server) = start_mock_store().await;
    let config = tempdir().unwrap();
    let session = Session::new(
        &format!("http://{addr}"),
        FileClientStore::in_dir(&utf8(config.path())),
    )
    .unwrap();

    session.remember("expired".into()).unwrap();
    let err = commands::cmd_list(&session, None, false).await.unwrap_err();
    assert!(err.to_string().contains("log in again"), "{err}");
    assert!(session.token().is_err());

    server.abort();
}

#[tokio::test]
async fn preview_from_a_local_directory() {
    let (addr, server) = start_mock_store().await;
    let config = tempdir().unwrap();
    let work = tempdir().unwrap();
    let src = utf8(work.path()).join("src");
    std::fs::create_dir_all(&src).unwrap();
    std::fs::write(src.join(codepad_cli::SCRIPT_FILE), "go()").unwrap();

    let session = Session::new(
        &format!("http://{addr}"),
        FileClientStore::in_dir(&utf8(config.path())),
    )
    .unwrap();

    let doc = commands::cmd_preview(
        &session,
        PreviewSource::Dir(src),
        Some(utf8(work.path()).join("out")),
        false,
    )
    .await
    .unwrap();
    assert_eq!(doc.as_str(), "<style></style><script>go()</script>");

    server.abort();
}
