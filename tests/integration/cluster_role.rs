use kube::Api;

use kube_test_framework::store::{lookup, ErrorClass, ObjectStore};

use super::common::*;

/// Create, update and delete a ClusterRole through the framework helpers.
#[tokio::test]
#[ignore = "requires a Kubernetes cluster"]
async fn cluster_role_create_update_delete() {
    let f = framework().await;
    let ctx = f.new_test_ctx("TestClusterRole/Lifecycle");
    let name = ctx.id();

    let created = f
        .create_or_update_cluster_role(&role_manifest(&name, &["get"]))
        .await
        .expect("create failed");
    assert_eq!(created.rules.as_ref().unwrap()[0].verbs, vec!["get"]);

    let updated = f
        .create_or_update_cluster_role(&role_manifest(&name, &["get", "list", "watch"]))
        .await
        .expect("update failed");
    assert_eq!(updated.rules.as_ref().unwrap()[0].verbs.len(), 3);

    f.delete_cluster_role(&role_manifest(&name, &[]))
        .await
        .expect("delete failed");
    let api: Api<k8s_openapi::api::rbac::v1::ClusterRole> = Api::all(f.client.clone());
    assert!(wait_for_role_deleted(&api, &name).await, "{name} never went away");

    let store = f.cluster_roles();
    let err = store.get(&name).await.unwrap_err();
    assert_eq!(store.classify_error(&err), ErrorClass::NotFound);
}

/// Mutate a fetched ClusterRole locally and push it back with `update`.
#[tokio::test]
#[ignore = "requires a Kubernetes cluster"]
async fn cluster_role_update_in_place() {
    let f = framework().await;
    let mut ctx = f.new_test_ctx("TestClusterRole/UpdateInPlace");
    let name = ctx.id();
    let manifest = role_manifest(&name, &["get", "list"]);

    let mut role = f.create_or_update_cluster_role(&manifest).await.unwrap();
    {
        let f = f.clone();
        ctx.add_finalizer_fn(move || async move { f.delete_cluster_role(&manifest).await });
    }

    role.rules.as_mut().unwrap()[0].verbs.pop();
    f.update_cluster_role(&role).await.unwrap();

    let stored = lookup(&f.cluster_roles(), &name).await.unwrap().unwrap();
    assert_eq!(stored.rules.unwrap()[0].verbs, vec!["get"]);

    f.cleanup(&mut ctx).await.expect("cleanup failed");
}
