mod common;

use apichain::prelude::*;
use common::{node, RecordingTransport};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[test_log::test]
fn chain_sends_in_order_and_forwards_results() {
    let transport = RecordingTransport::echo();
    let login = node(&transport, "/login").callback(|_, _| Ok(json!({ "token": "t0k" })));
    let profile = node(&transport, "/profile").path(Field::deferred(|prev| {
        let token = prev
            .and_then(|p| p.callback_result())
            .and_then(|v| v["token"].as_str())
            .unwrap_or("missing");
        Ok(format!("/profile/{token}"))
    }));

    login.then(profile).send().unwrap();

    assert_eq!(
        transport.urls(),
        ["http://test.local/login", "http://test.local/profile/t0k"]
    );
}

#[test]
fn send_returns_own_envelope_not_successors() {
    let transport = RecordingTransport::echo();
    let seen_at_end = Arc::new(Mutex::new(None));
    let sink = seen_at_end.clone();

    let first = node(&transport, "/first").callback(|_, _| Ok(json!("first")));
    let last = node(&transport, "/last").callback(move |_, prev| {
        *sink.lock().unwrap() = prev.callback_result().cloned();
        Ok(json!("last"))
    });

    let result = first.then(last).send().unwrap();

    assert_eq!(result.callback_result(), Some(&json!("first")));
    assert_eq!(
        result.single_response().map(|r| r.url.as_str()),
        Some("http://test.local/first")
    );
    assert_eq!(*seen_at_end.lock().unwrap(), Some(json!("first")));
}

#[test]
fn resolvers_run_at_every_send_against_latest_prev() {
    let transport = RecordingTransport::echo();
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();

    let api = node(&transport, "/x").query(Field::deferred(move |prev| {
        let n = counter.fetch_add(1, Ordering::SeqCst);
        let seed = prev
            .and_then(|p| p.callback_result())
            .and_then(Value::as_i64)
            .unwrap_or(-1);
        Ok(format!("n={n}&seed={seed}"))
    }));

    assert_eq!(calls.load(Ordering::SeqCst), 0);
    api.send().unwrap();
    let api = api.prev_result(ApiResult::new(None, Some(json!(42))));
    api.send().unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(
        transport.urls(),
        ["http://test.local/x?n=0&seed=-1", "http://test.local/x?n=1&seed=42"]
    );
}

#[test]
fn node_without_host_skips_network_but_runs_callback() {
    let seen = Arc::new(Mutex::new(None));
    let sink = seen.clone();
    let api = Api::new().path("/only-a-path").callback(move |response, prev| {
        *sink.lock().unwrap() = Some((response.is_none(), prev.clone()));
        Ok(json!({ "ran": true }))
    });

    let result = api.send().unwrap();

    assert!(result.resp().is_none());
    assert_eq!(result.callback_result(), Some(&json!({ "ran": true })));
    let (no_response, effective_prev) = seen.lock().unwrap().clone().unwrap();
    assert!(no_response);
    assert_eq!(effective_prev, ApiResult::default());
}

#[test]
fn callback_sees_predecessor_envelope_when_present() {
    let transport = RecordingTransport::echo();
    let seen = Arc::new(Mutex::new(None));
    let sink = seen.clone();

    let first = node(&transport, "/a").callback(|_, _| Ok(json!({ "step": 1 })));
    let second = node(&transport, "/b").callback(move |response, prev| {
        *sink.lock().unwrap() = Some((
            response.map(|r| r.url.clone()),
            prev.single_response().map(|r| r.url.clone()),
            prev.callback_result().cloned(),
        ));
        Ok(Value::Null)
    });
    first.then(second).send().unwrap();

    let (own, prev_url, prev_value) = seen.lock().unwrap().clone().unwrap();
    assert_eq!(own.as_deref(), Some("http://test.local/b"));
    assert_eq!(prev_url.as_deref(), Some("http://test.local/a"));
    assert_eq!(prev_value, Some(json!({ "step": 1 })));
}

#[test_log::test]
fn fan_out_merges_in_send_order_later_wins() {
    let transport = RecordingTransport::echo();
    let root = node(&transport, "/root").callback(|_, _| Ok(json!({ "root": true })));
    let x = node(&transport, "/x").callback(|_, _| Ok(json!({ "shared": "x", "x": 1 })));
    let y = node(&transport, "/y").callback(|_, _| Ok(json!({ "shared": "y", "y": 2 })));
    let silent = Api::new();

    let result = root.then([x, silent, y]).send().unwrap();

    assert_eq!(
        transport.urls(),
        ["http://test.local/root", "http://test.local/x", "http://test.local/y"]
    );
    assert_eq!(
        result.callback_result(),
        Some(&json!({ "shared": "y", "x": 1, "y": 2 }))
    );
    let group = result.resp().unwrap().as_group().unwrap();
    assert_eq!(group.len(), 3);
    assert!(group[1].is_none());
    let urls: Vec<_> = result
        .resp()
        .unwrap()
        .responses()
        .into_iter()
        .map(|r| r.url.clone())
        .collect();
    assert_eq!(urls, ["http://test.local/x", "http://test.local/y"]);
}

#[test]
fn fan_out_members_receive_parent_envelope() {
    let transport = RecordingTransport::echo();
    let seen = Arc::new(Mutex::new(Vec::new()));

    let root = node(&transport, "/root").callback(|_, _| Ok(json!({ "id": 7 })));
    let members: Vec<Api> = ["/a", "/b"]
        .into_iter()
        .map(|path| {
            let sink = seen.clone();
            node(&transport, path).callback(move |_, prev| {
                sink.lock().unwrap().push(prev.callback_result().cloned());
                Ok(Value::Null)
            })
        })
        .collect();

    root.then(members).send().unwrap();

    assert_eq!(
        *seen.lock().unwrap(),
        [Some(json!({ "id": 7 })), Some(json!({ "id": 7 }))]
    );
}

#[test]
fn group_then_single_runs_group_first_and_forwards_merge() {
    let transport = RecordingTransport::echo();
    let seen = Arc::new(Mutex::new(None));
    let sink = seen.clone();

    let root = node(&transport, "/root");
    let x = node(&transport, "/x").callback(|_, _| Ok(json!({ "x": 1 })));
    let y = node(&transport, "/y").callback(|_, _| Ok(json!({ "y": 2 })));
    let after = node(&transport, "/after").callback(move |_, prev| {
        *sink.lock().unwrap() = prev.callback_result().cloned();
        Ok(Value::Null)
    });

    let root = root.then([x, y]).then(after.clone());

    assert!(root.get_next_api().unwrap().same_node(&after));
    assert_eq!(root.get_next_api_list().map(|g| g.len()), Some(2));

    root.send().unwrap();
    assert_eq!(
        transport.urls(),
        [
            "http://test.local/root",
            "http://test.local/x",
            "http://test.local/y",
            "http://test.local/after"
        ]
    );
    assert_eq!(*seen.lock().unwrap(), Some(json!({ "x": 1, "y": 2 })));
}

#[test]
fn failing_member_aborts_rest_of_fan_out() {
    let transport = RecordingTransport::responding(|request| {
        if request.url.ends_with("/boom") {
            Err(TransportError::RequestFailed {
                status_code: Some(500),
                underlying_error: "server exploded".to_owned(),
            })
        } else {
            Ok(NetworkResponse::new(200, "{}"))
        }
    });
    let after_ran = Arc::new(AtomicUsize::new(0));
    let flag = after_ran.clone();

    let root = node(&transport, "/root")
        .then([
            node(&transport, "/ok"),
            node(&transport, "/boom"),
            node(&transport, "/never"),
        ])
        .then(Api::new().callback(move |_, _| {
            flag.fetch_add(1, Ordering::SeqCst);
            Ok(Value::Null)
        }));

    let error = root.send().unwrap_err();

    assert!(matches!(
        error,
        ApiError::Transport {
            error: TransportError::RequestFailed {
                status_code: Some(500),
                ..
            }
        }
    ));
    assert_eq!(
        transport.urls(),
        ["http://test.local/root", "http://test.local/ok", "http://test.local/boom"]
    );
    assert_eq!(after_ran.load(Ordering::SeqCst), 0);
}

#[test]
fn non_object_member_result_is_a_merge_error() {
    let root = Api::new().then([
        Api::new().callback(|_, _| Ok(json!({ "fine": 1 }))),
        Api::new().callback(|_, _| Ok(json!([1, 2]))),
    ]);

    match root.send().unwrap_err() {
        ApiError::FanOutMerge { index, found } => {
            assert_eq!(index, 1);
            assert_eq!(found, json!([1, 2]));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn before_send_runs_first_and_can_abort() {
    let transport = RecordingTransport::echo();
    let order = Arc::new(Mutex::new(Vec::new()));
    let hook_log = order.clone();
    let resolver_log = order.clone();

    let api = node(&transport, "/x")
        .before_send(move |prev, _api| {
            hook_log.lock().unwrap().push(format!("hook:{}", prev.is_some()));
            Ok(())
        })
        .path(Field::deferred(move |_| {
            resolver_log.lock().unwrap().push("resolve".to_owned());
            Ok("/y".to_owned())
        }));
    api.send().unwrap();
    assert_eq!(*order.lock().unwrap(), ["hook:false", "resolve"]);

    let blocked = node(&transport, "/blocked").before_send(|_, _| Err("not today".into()));
    let error = blocked.send().unwrap_err();
    assert!(matches!(error, ApiError::BeforeSend { .. }));
    assert_eq!(transport.urls(), ["http://test.local/y"]);
}

#[test]
fn before_send_may_reconfigure_the_node() {
    let transport = RecordingTransport::echo();
    let api = node(&transport, "/x").before_send(|_, api| {
        api.clone().header("X-Signed", "yes");
        Ok(())
    });
    api.send().unwrap();
    assert_eq!(
        transport.requests()[0].headers.get("X-Signed").map(String::as_str),
        Some("yes")
    );
}

#[test]
fn resolver_failure_names_the_field() {
    let transport = RecordingTransport::echo();
    let api = node(&transport, "/x")
        .cookie(Field::deferred(|_| Err("no session".into())));

    match api.send().unwrap_err() {
        ApiError::Resolver { field, source } => {
            assert_eq!(field, "cookie");
            assert_eq!(source.to_string(), "no session");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(transport.requests().is_empty());
}

#[test]
fn callback_failure_is_reported() {
    let transport = RecordingTransport::echo();
    let api = node(&transport, "/x").callback(|_, _| Err("bad payload".into()));
    assert!(matches!(api.send(), Err(ApiError::Callback { .. })));
    assert_eq!(transport.requests().len(), 1);
}

#[test]
fn request_carries_every_resolved_field() {
    let transport = RecordingTransport::echo();
    let api = node(&transport, "/submit")
        .method("put")
        .verify(false)
        .stream(true)
        .cookie([("session", "abc"), ("lang", "en")])
        .proxy(Proxy::new("10.0.0.2", Some(3128), "http"))
        .headers(Field::deferred(|_| {
            Ok(Headers::from([("X-Run".to_owned(), "1".to_owned())]))
        }));

    api.send().unwrap();

    let request = &transport.requests()[0];
    assert_eq!(request.method, "put");
    assert!(!request.verify);
    assert!(request.stream);
    assert_eq!(request.cookie_header().as_deref(), Some("lang=en; session=abc"));
    assert_eq!(
        request.proxy.as_ref().and_then(|p| p.get("http")).map(String::as_str),
        Some("http://10.0.0.2:3128")
    );
    assert_eq!(request.headers["X-Run"], "1");
    assert_eq!(request.headers["Content-Type"], "application/json");
}

#[test]
fn env_resolved_after_url_wins_over_its_host() {
    let transport = RecordingTransport::echo();
    let api = Api::new()
        .transport(transport.clone())
        .url(Field::deferred(|_| Ok("http://from-url.local/p".to_owned())))
        .unwrap()
        .env(Field::deferred(|_| Ok(Env::new("from-env.local", Some(8081), "http"))));

    api.send().unwrap();

    assert_eq!(transport.urls(), ["http://from-env.local:8081/p"]);
}

#[test]
fn json_body_follows_content_type() {
    let transport = RecordingTransport::echo();

    node(&transport, "/json")
        .body(json!({ "name": "a b", "n": 1 }))
        .post()
        .unwrap();
    node(&transport, "/form")
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(json!({ "name": "a b", "n": 1 }))
        .post()
        .unwrap();
    node(&transport, "/text")
        .body(r#"{"already":"encoded"}"#)
        .post()
        .unwrap();

    let requests = transport.requests();
    assert!(requests.iter().all(|r| r.method == "post"));
    assert_eq!(
        requests[0].body.as_deref(),
        Some(br#"{"name":"a b","n":1}"#.as_slice())
    );
    assert_eq!(requests[1].body.as_deref(), Some(b"name=a+b&n=1".as_slice()));
    assert_eq!(
        requests[2].body.as_deref(),
        Some(br#"{"already":"encoded"}"#.as_slice())
    );
}

#[test]
fn content_type_differing_by_case_resolves_to_first_inserted() {
    for _ in 0..50 {
        let transport = RecordingTransport::echo();
        node(&transport, "/form")
            .header("content-type", "application/x-www-form-urlencoded")
            .body(json!({ "a": "b" }))
            .post()
            .unwrap();

        let request = &transport.requests()[0];
        assert_eq!(request.header("Content-Type"), Some("application/json"));
        assert_eq!(request.body.as_deref(), Some(br#"{"a":"b"}"#.as_slice()));
        let names: Vec<_> = request.headers.keys().map(String::as_str).collect();
        assert_eq!(names, ["Content-Type", "content-type"]);
    }
}

#[test]
fn replacing_content_type_with_same_spelling_switches_to_form() {
    let transport = RecordingTransport::echo();
    node(&transport, "/form")
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(json!({ "a": "b" }))
        .post()
        .unwrap();

    let request = &transport.requests()[0];
    assert_eq!(request.headers.len(), 1);
    assert_eq!(request.body.as_deref(), Some(b"a=b".as_slice()));
}

#[test]
fn get_forces_method_but_deferred_method_wins() {
    let transport = RecordingTransport::echo();
    node(&transport, "/a").method("delete").get().unwrap();
    node(&transport, "/b")
        .method(Field::deferred(|_| Ok("patch".to_owned())))
        .get()
        .unwrap();

    let methods: Vec<_> = transport.requests().into_iter().map(|r| r.method).collect();
    assert_eq!(methods, ["get", "patch"]);
}

#[test]
fn send_and_get_json_parses_own_response() {
    let transport = RecordingTransport::echo();
    let value = node(&transport, "/me").send_and_get_json().unwrap();
    assert_eq!(value, json!({ "url": "http://test.local/me" }));

    assert!(matches!(
        Api::new().send_and_get_json(),
        Err(ApiError::NoResponse)
    ));

    let html = RecordingTransport::responding(|_| Ok(NetworkResponse::new(200, "<html></html>")));
    assert!(matches!(
        node(&html, "/page").send_and_get_json(),
        Err(ApiError::ResponseNotJson { .. })
    ));
}

#[test]
fn send_and_print_returns_envelope() {
    let transport = RecordingTransport::echo();
    let result = node(&transport, "/print")
        .then([node(&transport, "/a"), node(&transport, "/b")])
        .send_and_print()
        .unwrap();
    assert_eq!(result.resp().unwrap().responses().len(), 2);
    assert!(Api::new().send_and_print().unwrap().resp().is_none());
}
