use super::fakes::Checkout;
use crate::{InputLines, QUIT_LINE, TerminalPresenter, interactive_loop};

use std::time::Duration;

use vm_control::ControlPanel;

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn given_quit_while_update_prompt_pending_when_loop_runs_then_server_stopped_and_loop_returns()
{
    // Given: a running server and an update prompt waiting in the queue
    let checkout = Checkout::behind(2);
    let (tx, input) = InputLines::channel();
    let presenter = TerminalPresenter::new(Vec::new(), input.clone(), false);
    let mut panel = ControlPanel::new(presenter, checkout.controller(), checkout.reconciler());

    panel.start_server().await;
    panel.check_for_updates().await.unwrap();

    // When: the only input is the quit a signal sends
    tx.send(QUIT_LINE.to_string()).unwrap();
    tokio::time::timeout(Duration::from_secs(5), interactive_loop(&mut panel, &input))
        .await
        .expect("loop kept running after quit");

    // Then
    assert!(checkout.terminated());
    assert_eq!(*checkout.pulls.lock().unwrap(), 0);

    let output = String::from_utf8(panel.presenter().output().clone()).unwrap();
    let prompt = output.find("Updates Available").unwrap();
    let stopped = output.find("Server stopped.").unwrap();
    assert!(prompt < stopped);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn given_quit_typed_when_loop_runs_then_server_stopped() {
    let checkout = Checkout::behind(0);
    let (tx, input) = InputLines::channel();
    let presenter = TerminalPresenter::new(Vec::new(), input.clone(), false);
    let mut panel = ControlPanel::new(presenter, checkout.controller(), checkout.reconciler());
    panel.start_server().await;

    tx.send(String::from("q")).unwrap();
    tokio::time::timeout(Duration::from_secs(5), interactive_loop(&mut panel, &input))
        .await
        .expect("loop kept running after quit");

    assert!(checkout.terminated());
}
