use crate::{
    Error,
    Mutation,
    MutationStatus,
};

#[test]
fn test_lifecycle() {
    let mut m = Mutation::<u32>::new();
    assert!(m.is_idle());

    m.begin().unwrap();
    assert!(m.is_pending());
    assert!(m.begin().is_err());

    assert_eq!(m.settle(Ok(7)), Ok(7));
    assert!(m.is_success());
    assert_eq!(m.data(), Some(&7));

    m.reset();
    assert_eq!(m.status(), &MutationStatus::Idle);
    assert_eq!(m.data(), None);
}

#[tokio::test]
async fn test_run() {
    let mut m = Mutation::<()>::new();

    assert!(m.run(async { Ok(()) }).await.is_ok());
    assert!(m.is_success());

    let rc = m.run(async { Err(Error::Network("down".into())) }).await;
    assert!(rc.is_err());
    assert_eq!(m.status(), &MutationStatus::Error("down".into()));
    assert!(m.is_error());
    assert_eq!(m.error(), Some(&Error::Network("down".into())));
}
