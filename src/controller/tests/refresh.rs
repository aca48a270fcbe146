use super::super::jobs::GridFetchResult;
use super::super::test_support::*;
use super::super::*;
use crate::host::PageEvent;
use crate::portal::FetchError;

#[test]
fn successful_refresh_updates_page_in_order() {
    let transport = Arc::new(ScriptedTransport::default());
    let url = "/publikasi?search=pendidikan&page=1";
    transport.script(url, GridScript::Payload(payload(&["a", "b"], Some((1, 3)))));
    let mut controller = controller_with(&transport);

    controller.refresh_grid(url);
    settle(&mut controller);

    let page = controller.page();
    assert_eq!(
        page.events,
        vec![
            PageEvent::ShowLoading,
            PageEvent::ReplaceGrid(vec!["a".to_string(), "b".to_string()]),
            PageEvent::SetResultCount("2 documents found".to_string()),
            PageEvent::ReplacePagination(1, 3),
            PageEvent::PushHistory(url.to_string()),
            PageEvent::HideLoading,
        ]
    );
    assert_eq!(page.url, url);
    assert_eq!(page.history[0].0.path, url);
    assert!(!page.loading);
    assert_eq!(controller.current_url(), url);
    assert!(page.navigations().is_empty());
}

#[test]
fn single_page_result_removes_pagination() {
    let transport = Arc::new(ScriptedTransport::default());
    transport.script(
        "/publikasi?year=2019&page=1",
        GridScript::Payload(payload(&["a"], Some((1, 1)))),
    );
    let mut controller = controller_with(&transport);
    controller.page_mut().pagination = PaginationView::from_descriptor(
        &crate::portal::PaginationDescriptor {
            current_page: 1,
            last_page: 5,
        },
    );

    controller.refresh_grid("/publikasi?year=2019&page=1");
    settle(&mut controller);

    assert!(controller.page().pagination.is_none());
    assert!(controller.page().events.contains(&PageEvent::RemovePagination));
}

#[test]
fn error_status_falls_back_to_full_navigation() {
    let transport = Arc::new(ScriptedTransport::default());
    let url = "/publikasi?year=2023&page=1";
    transport.script(url, GridScript::Status(500));
    let mut controller = controller_with(&transport);
    controller.page_mut().grid = vec!["old".to_string()];

    controller.refresh_grid(url);
    settle(&mut controller);

    let page = controller.page();
    assert_eq!(
        page.events,
        vec![
            PageEvent::ShowLoading,
            PageEvent::HideLoading,
            PageEvent::Navigate(url.to_string()),
        ]
    );
    assert_eq!(page.grid, vec!["old"]);
    assert!(page.history.is_empty());
    assert!(!controller.is_refreshing());
}

#[test]
fn malformed_payload_falls_back_to_full_navigation() {
    let transport = Arc::new(ScriptedTransport::default());
    let url = "/publikasi?type=brs&page=1";
    transport.script(url, GridScript::Malformed);
    let mut controller = controller_with(&transport);

    controller.refresh_grid(url);
    settle(&mut controller);

    assert_eq!(controller.page().navigations(), vec![url]);
    assert!(controller.page().history.is_empty());
}

#[test]
fn surface_failure_falls_back_to_full_navigation() {
    let transport = Arc::new(ScriptedTransport::default());
    let url = "/publikasi?indicator=ipm&page=1";
    transport.script(url, GridScript::Payload(payload(&["a"], None)));
    let mut controller = controller_with(&transport);
    controller.page_mut().fail_grid_writes = true;

    controller.refresh_grid(url);
    settle(&mut controller);

    assert_eq!(controller.page().navigations(), vec![url]);
    assert!(controller.page().history.is_empty());
    assert!(!controller.page().loading);
}

#[test]
fn stale_success_never_overwrites_newer_grid() {
    let transport = Arc::new(ScriptedTransport::default());
    let mut controller = controller_with(&transport);
    let older = controller.grid_requests.issue();
    let newer = controller.grid_requests.issue();
    controller.grid_in_flight = true;

    controller.handle_grid_fetched(GridFetchResult {
        token: newer,
        url: "/publikasi?year=2024&page=1".to_string(),
        history: HistoryUpdate::Push,
        result: Ok(payload(&["new"], None)),
    });
    controller.handle_grid_fetched(GridFetchResult {
        token: older,
        url: "/publikasi?year=2023&page=1".to_string(),
        history: HistoryUpdate::Push,
        result: Ok(payload(&["old"], None)),
    });

    let page = controller.page();
    assert_eq!(page.grid, vec!["new"]);
    assert_eq!(page.url, "/publikasi?year=2024&page=1");
    assert_eq!(page.history.len(), 1);
    assert_eq!(controller.current_url(), "/publikasi?year=2024&page=1");
}

#[test]
fn stale_failure_does_not_navigate_or_hide_loading() {
    let transport = Arc::new(ScriptedTransport::default());
    let mut controller = controller_with(&transport);
    let older = controller.grid_requests.issue();
    let _newer = controller.grid_requests.issue();
    controller.grid_in_flight = true;
    controller.page_mut().loading = true;

    controller.handle_grid_fetched(GridFetchResult {
        token: older,
        url: "/publikasi?year=2023&page=1".to_string(),
        history: HistoryUpdate::Push,
        result: Err(FetchError::Transport("connection reset".to_string())),
    });

    assert!(controller.page().navigations().is_empty());
    assert!(controller.page().loading);
    assert!(controller.is_refreshing());
}

#[test]
fn slow_earlier_fetch_loses_to_later_one() {
    let transport = Arc::new(ScriptedTransport::default());
    transport.script_delayed(
        "/publikasi?year=2020&page=1",
        GridScript::Payload(payload(&["slow"], None)),
        ms(150),
    );
    transport.script(
        "/publikasi?year=2021&page=1",
        GridScript::Payload(payload(&["fast"], None)),
    );
    let mut controller = controller_with(&transport);

    controller.refresh_grid("/publikasi?year=2020&page=1");
    controller.refresh_grid("/publikasi?year=2021&page=1");
    settle(&mut controller);

    let page = controller.page();
    assert_eq!(page.grid, vec!["fast"]);
    assert_eq!(page.url, "/publikasi?year=2021&page=1");
    assert_eq!(page.history.len(), 1);
    assert!(page.navigations().is_empty());
}

#[test]
fn reordered_query_is_fetched_and_recorded_canonically() {
    let transport = Arc::new(ScriptedTransport::default());
    let canonical = "/publikasi?year=2023&page=1";
    transport.script(canonical, GridScript::Payload(payload(&["y"], Some((1, 2)))));
    transport.script(
        "/publikasi?year=2023&page=2",
        GridScript::Payload(payload(&["z"], Some((2, 2)))),
    );
    let mut controller = controller_with(&transport);

    controller.refresh_grid("/publikasi?page=1&year=2023#hasil");
    settle(&mut controller);

    assert_eq!(transport.grid_requests(), vec![canonical.to_string()]);
    assert_eq!(controller.page().url, canonical);
    assert_eq!(controller.page().history[0].0.path, canonical);
    assert_eq!(controller.current_url(), controller.page().url);

    assert!(controller.on_click(&crate::host::ElementTarget::page_link(2)));
    settle(&mut controller);
    assert_eq!(controller.page().url, "/publikasi?year=2023&page=2");
    assert_eq!(controller.current_url(), controller.page().url);
}

#[test]
fn foreign_listing_path_navigates_without_fetching() {
    let transport = Arc::new(ScriptedTransport::default());
    let current = "/publikasi?search=upah&page=1";
    transport.script(current, GridScript::Payload(payload(&["u"], Some((1, 3)))));
    let mut controller = controller_with(&transport);
    controller.refresh_grid(current);
    settle(&mut controller);

    controller.refresh_grid("/indikator?year=2023&page=1");
    settle(&mut controller);

    assert_eq!(transport.grid_requests(), vec![current.to_string()]);
    assert_eq!(
        controller.page().navigations(),
        vec!["/indikator?year=2023&page=1"]
    );
    assert_eq!(controller.current_url(), current);
    assert!(!controller.is_refreshing());
}
