use k8s_openapi::api::rbac::v1::ClusterRole;
use kube::Api;

use kube_test_framework::error::Error;

use super::common::*;

/// Roles registered for teardown are all removed by cleanup, and a
/// failing finalizer does not stop the others.
#[tokio::test]
#[ignore = "requires a Kubernetes cluster"]
async fn cleanup_removes_every_registered_role() {
    let f = framework().await;
    let mut ctx = f.new_test_ctx("TestTeardown/Roles");
    let mut names = Vec::new();

    for _ in 0..3 {
        let name = ctx.id();
        let manifest = role_manifest(&name, &["get"]);
        f.create_or_update_cluster_role(&manifest).await.unwrap();
        let f = f.clone();
        ctx.add_finalizer_fn(move || async move { f.delete_cluster_role(&manifest).await });
        names.push(name);
    }
    // Deleting a role that was never created fails with not-found.
    let missing = role_manifest(&format!("{}-missing", ctx.id()), &["get"]);
    {
        let f = f.clone();
        ctx.add_finalizer_fn(move || async move { f.delete_cluster_role(&missing).await });
    }

    let err = f.cleanup(&mut ctx).await.expect_err("cleanup should fail");
    let Error::Finalizers(failures) = &err else {
        panic!("unexpected error: {err}");
    };
    assert_eq!(failures.len(), 1);
    assert_eq!(failures.iter().next().unwrap().position, 3);

    let api: Api<ClusterRole> = Api::all(f.client.clone());
    for name in &names {
        assert!(wait_for_role_deleted(&api, name).await, "{name} was not removed");
    }
}
