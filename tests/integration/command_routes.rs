//! Integration tests for the create/update/get/delete/list routes through RunContext

use super::test_utils::{args, context_with, library_record, test_config, Call, RecordingGateway};
use apigw::cli::{Commands, RunContext};
use apigw::endpoint::model::{EndpointSelector, EndpointSource, Pagination};
use apigw::endpoint::verb::HttpVerb;
use apigw::error::{ErrorKind, ExitCode};

fn create(tokens: &[&str]) -> Commands {
    Commands::Create {
        args: args(tokens),
        api_name: None,
        config_file: None,
    }
}

fn list(tokens: &[&str], full: bool) -> Commands {
    Commands::List {
        args: args(tokens),
        skip: 0,
        limit: 30,
        full,
        format: "text".to_string(),
    }
}

#[test]
fn test_create_from_arguments() {
    let gateway = RecordingGateway::returning(vec![library_record()]);
    let context = context_with(&gateway);

    let output = context
        .execute(&create(&["/library", "/books", "get", "list-books"]))
        .unwrap();
    assert_eq!(
        output,
        "ok: created API /library/books GET for action /guest/list-books\nhttps://gw.example.com/api/1234/library/books"
    );

    let calls = gateway.calls();
    assert_eq!(calls.len(), 1);
    let Call::Insert {
        definition,
        overwrite,
    } = &calls[0]
    else {
        panic!("expected insert, got {:?}", calls[0]);
    };
    assert!(!overwrite);
    assert_eq!(definition.namespace, "guest");
    let fields = definition.fields().unwrap();
    assert_eq!(fields.base_path, "/library");
    assert_eq!(fields.relative_path, "/books");
    assert_eq!(fields.verb, HttpVerb::Get);
    assert_eq!(fields.id.as_deref(), Some("API:guest:/library"));
    let action = fields.action.as_ref().unwrap();
    assert_eq!(
        action.backend_url,
        "https://openwhisk.example.com/api/v1/namespaces/guest/actions/list-books"
    );
    assert_eq!(action.backend_method, "POST");
}

#[test]
fn test_create_with_api_name_flag() {
    let gateway = RecordingGateway::returning(vec![library_record()]);
    let context = context_with(&gateway);

    context
        .execute(&Commands::Create {
            args: args(&["/books", "post", "/guest/tools/add-book"]),
            api_name: Some("library".to_string()),
            config_file: None,
        })
        .unwrap();

    let calls = gateway.calls();
    let Call::Insert { definition, .. } = &calls[0] else {
        panic!("expected insert");
    };
    let fields = definition.fields().unwrap();
    assert_eq!(fields.base_path, "/");
    assert_eq!(fields.api_name.as_deref(), Some("library"));
    assert!(fields.id.is_none());
    let action = fields.action.as_ref().unwrap();
    assert_eq!(action.package.as_deref(), Some("tools"));
    assert_eq!(action.entity_path(), "tools/add-book");
}

#[test]
fn test_create_from_swagger_file() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("library.json");
    std::fs::write(&path, super::test_utils::LIBRARY_DOCUMENT).unwrap();

    let gateway = RecordingGateway::returning(vec![library_record()]);
    let context = context_with(&gateway);
    let output = context
        .execute(&Commands::Create {
            args: vec![],
            api_name: None,
            config_file: Some(path),
        })
        .unwrap();

    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(
        lines,
        vec![
            "ok: created API /authors get for action list-authors",
            "https://gw.example.com/api/1234/library/authors",
            "ok: created API /books get for action list-books",
            "https://gw.example.com/api/1234/library/books",
            "ok: created API /books post for action add-book",
            "https://gw.example.com/api/1234/library/books",
        ]
    );

    let calls = gateway.calls();
    let Call::Insert { definition, .. } = &calls[0] else {
        panic!("expected insert");
    };
    assert!(definition.is_document_sourced());
    assert!(matches!(&definition.source, EndpointSource::Document(raw) if raw.contains("\"basePath\": \"/library\"")));
}

#[test]
fn test_create_requires_arguments_or_file() {
    let gateway = RecordingGateway::default();
    let err = context_with(&gateway).execute(&create(&[])).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::Usage(_)));
    assert_eq!(err.exit_code(), ExitCode::Usage);
    assert!(err.flags().display_usage);
    assert!(gateway.calls().is_empty());
}

#[test]
fn test_create_rejects_arguments_and_file_together() {
    let gateway = RecordingGateway::default();
    let err = context_with(&gateway)
        .execute(&Commands::Create {
            args: args(&["/books", "get", "list-books"]),
            api_name: None,
            config_file: Some("library.json".into()),
        })
        .unwrap_err();
    assert_eq!(err.exit_code(), ExitCode::Usage);
    assert!(err.message().contains("not both"));
    assert!(gateway.calls().is_empty());
}

#[test]
fn test_create_with_invalid_verb_is_wrapped() {
    let gateway = RecordingGateway::default();
    let err = context_with(&gateway)
        .execute(&create(&["/library", "/books", "fetch", "list-books"]))
        .unwrap_err();
    assert!(err
        .message()
        .starts_with("Unable to parse API command arguments: "));
    assert!(err.message().contains("'fetch' is not a valid API verb."));
    assert_eq!(err.exit_code(), ExitCode::General);
    assert!(err.flags().display_message);
    assert!(err.flags().display_usage);
    assert!(gateway.calls().is_empty());
}

#[test]
fn test_create_remote_failure_keeps_client_exit_code() {
    let gateway = RecordingGateway::failing("API already exists", ExitCode::HttpResponse);
    let err = context_with(&gateway)
        .execute(&create(&["/library", "/books", "get", "list-books"]))
        .unwrap_err();
    assert_eq!(err.message(), "Unable to create API: API already exists");
    assert_eq!(err.exit_code(), ExitCode::HttpResponse);
    assert!(!err.flags().display_usage);
    assert_eq!(err.chain().count(), 2);
}

#[test]
fn test_missing_apihost_fails_only_at_remote_call() {
    let mut config = test_config();
    config.client.apihost = String::new();
    let context = RunContext::with_config(config);

    let err = context.execute(&create(&["/books"])).unwrap_err();
    assert_eq!(err.exit_code(), ExitCode::Usage, "arguments are checked first");

    let err = context
        .execute(&create(&["/library", "/books", "get", "list-books"]))
        .unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::Config(_)));
    assert!(err.message().starts_with("Unable to create API: The API host is not configured"));
    assert_eq!(err.exit_code(), ExitCode::General);
}

#[test]
fn test_update_overwrites_and_reports_managed_url() {
    let gateway = RecordingGateway::returning(vec![library_record()]);
    let output = context_with(&gateway)
        .execute(&Commands::Update {
            args: args(&["/library", "/books", "GET", "list-books"]),
            api_name: None,
        })
        .unwrap();
    assert_eq!(
        output,
        "ok: updated API /books GET for action /guest/list-books\nhttps://gw.example.com/api/1234/library/books"
    );
    assert!(matches!(
        gateway.calls()[0],
        Call::Insert {
            overwrite: true,
            ..
        }
    ));
}

#[test]
fn test_get_prints_table() {
    let gateway = RecordingGateway::returning(vec![library_record()]);
    let output = context_with(&gateway)
        .execute(&Commands::Get {
            args: args(&["/library"]),
            full: false,
            format: "text".to_string(),
        })
        .unwrap();

    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], "Action                 Verb  API Name  URL");
    assert_eq!(
        lines[1],
        "/guest/list-authors     get   library  https://gw.example.com/api/1234/library/authors"
    );

    assert_eq!(
        gateway.calls(),
        vec![Call::Get {
            query: apigw::endpoint::model::EndpointQuery {
                selector: Some(EndpointSelector::BasePath("/library".to_string())),
                ..Default::default()
            },
            page: Pagination::default(),
        }]
    );
}

#[test]
fn test_get_json() {
    let gateway = RecordingGateway::returning(vec![library_record()]);
    let output = context_with(&gateway)
        .execute(&Commands::Get {
            args: args(&["library"]),
            full: false,
            format: "json".to_string(),
        })
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value[0]["gwApiUrl"], "https://gw.example.com/api/1234/library/");
    assert_eq!(value[0]["apidoc"]["basePath"], "/library");
}

#[test]
fn test_get_missing_api() {
    let gateway = RecordingGateway::returning(vec![]);
    let context = context_with(&gateway);

    let err = context
        .execute(&Commands::Get {
            args: args(&["/nope"]),
            full: false,
            format: "text".to_string(),
        })
        .unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::NotFound(_)));
    assert_eq!(err.message(), "API does not exist for basepath /nope");
    assert_eq!(err.exit_code(), ExitCode::General);
    assert!(!err.flags().display_usage);

    let err = context
        .execute(&Commands::Get {
            args: args(&["nope"]),
            full: false,
            format: "text".to_string(),
        })
        .unwrap_err();
    assert_eq!(err.message(), "API does not exist for API name nope");
}

#[test]
fn test_get_requires_exactly_one_argument() {
    let gateway = RecordingGateway::default();
    let err = context_with(&gateway)
        .execute(&Commands::Get {
            args: args(&["/library", "/books"]),
            full: false,
            format: "text".to_string(),
        })
        .unwrap_err();
    assert_eq!(err.exit_code(), ExitCode::Usage);
    assert!(gateway.calls().is_empty());
}

#[test]
fn test_delete_messages() {
    let gateway = RecordingGateway::default();
    let context = context_with(&gateway);

    let delete = |tokens: &[&str]| {
        context
            .execute(&Commands::Delete { args: args(tokens) })
            .unwrap()
    };
    assert_eq!(delete(&["/library"]), "ok: deleted API /library");
    assert_eq!(delete(&["/library", "/books"]), "ok: deleted /books from /library");
    assert_eq!(
        delete(&["library", "/books", "post"]),
        "ok: deleted /books POST from library"
    );

    let calls = gateway.calls();
    assert_eq!(calls.len(), 3);
    let Call::Delete(query) = &calls[2] else {
        panic!("expected delete");
    };
    assert_eq!(query.selector, Some(EndpointSelector::Name("library".to_string())));
    assert_eq!(query.verb, Some(HttpVerb::Post));
}

#[test]
fn test_delete_rejects_relative_path_without_slash() {
    let gateway = RecordingGateway::default();
    let err = context_with(&gateway)
        .execute(&Commands::Delete {
            args: args(&["/library", "books"]),
        })
        .unwrap_err();
    assert_eq!(err.message(), "'books' must begin with '/'.");
    assert!(gateway.calls().is_empty());
}

#[test]
fn test_list_all_uses_pagination() {
    let gateway = RecordingGateway::returning(vec![library_record()]);
    let output = context_with(&gateway)
        .execute(&Commands::List {
            args: vec![],
            skip: 5,
            limit: 10,
            full: false,
            format: "text".to_string(),
        })
        .unwrap();
    assert!(output.starts_with("ok: APIs\nAction "));
    assert_eq!(output.lines().count(), 5);
    assert_eq!(gateway.calls(), vec![Call::List(Pagination { skip: 5, limit: 10 })]);
}

#[test]
fn test_list_filters_by_path_and_verb() {
    let gateway = RecordingGateway::returning(vec![library_record()]);
    let context = context_with(&gateway);

    let output = context.execute(&list(&["library", "/books"], false)).unwrap();
    assert_eq!(output.lines().count(), 4);
    assert!(!output.contains("list-authors"));

    let output = context
        .execute(&list(&["library", "/books", "POST"], true))
        .unwrap();
    assert_eq!(
        output,
        "ok: APIs\nAction: /guest/add-book\n  API Name: library\n  Base path: /library\n  Path: /books\n  Verb: post\n  URL: https://gw.example.com/api/1234/library/books"
    );
}

#[test]
fn test_list_empty_still_prints_header() {
    let gateway = RecordingGateway::returning(vec![]);
    let output = context_with(&gateway).execute(&list(&[], false)).unwrap();
    assert_eq!(output, "ok: APIs\nAction    Verb  API Name  URL");
}

#[test]
fn test_list_remote_failure() {
    let gateway = RecordingGateway::failing("connection refused", ExitCode::Network);
    let err = context_with(&gateway)
        .execute(&list(&[], false))
        .unwrap_err();
    assert_eq!(
        err.message(),
        "Unable to obtain the API list: connection refused"
    );
    assert_eq!(err.exit_code(), ExitCode::Network);
}
