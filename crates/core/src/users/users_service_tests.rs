//! Tests for UserService registration.

#[cfg(test)]
mod tests {
    use crate::errors::{DatabaseError, Error};
    use crate::test_support::MockUserRepository;
    use crate::users::{UserService, UserServiceTrait};
    use rust_decimal_macros::dec;
    use std::sync::Arc;

    fn service(repo: &MockUserRepository) -> UserService {
        UserService::new(Arc::new(repo.clone()), dec!(100000))
    }

    #[tokio::test]
    async fn test_register_opens_funded_account() {
        let repo = MockUserRepository::new();
        let (user, account) = service(&repo)
            .register("Alice", "hash".to_string())
            .await
            .unwrap();

        assert_eq!(user.username, "alice");
        assert_eq!(account.user_id, user.id);
        assert_eq!(account.display_name, "alice");
        assert_eq!(account.cash, dec!(100000));
        assert!(account.holdings.is_empty());
        assert_eq!(account.valuation_history, vec![dec!(100000)]);
    }

    #[tokio::test]
    async fn test_register_rejects_duplicate_username() {
        let repo = MockUserRepository::new();
        let svc = service(&repo);
        svc.register("alice", "hash".to_string()).await.unwrap();

        let err = svc.register(" ALICE ", "hash2".to_string()).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Database(DatabaseError::UniqueViolation(_))
        ));
        assert_eq!(repo.user_count(), 1);
    }

    #[tokio::test]
    async fn test_register_rejects_invalid_username_before_writing() {
        let repo = MockUserRepository::new();
        let err = service(&repo)
            .register("a b", "hash".to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert_eq!(repo.user_count(), 0);
    }

    #[tokio::test]
    async fn test_find_by_username_is_case_insensitive() {
        let repo = MockUserRepository::new();
        let svc = service(&repo);
        let (user, _) = svc.register("carol", "hash".to_string()).await.unwrap();

        let found = svc.find_by_username("CAROL").unwrap().unwrap();
        assert_eq!(found.id, user.id);
        assert!(svc.get_user(&user.id).unwrap().is_some());
        assert!(svc.get_user("missing").unwrap().is_none());
    }
}
