use super::IUserRepo;
use crate::repos::shared::inmemory_repo::*;
use lifereminder_domain::{User, ID};
use std::sync::{Arc, Mutex};

pub struct InMemoryUserRepo {
    users: Arc<Mutex<Vec<User>>>,
}

impl InMemoryUserRepo {
    pub fn new(users: Arc<Mutex<Vec<User>>>) -> Self {
        Self { users }
    }
}

#[async_trait::async_trait]
impl IUserRepo for InMemoryUserRepo {
    async fn insert(&self, user: &User) -> anyhow::Result<()> {
        insert(user, &self.users);
        Ok(())
    }

    async fn save(&self, user: &User) -> anyhow::Result<()> {
        save(user, &self.users);
        Ok(())
    }

    async fn find(&self, user_id: &ID) -> Option<User> {
        find(user_id, &self.users)
    }

    async fn find_by_phone(&self, phone: &str) -> Option<User> {
        find_by(&self.users, |u| u.phone == phone).into_iter().next()
    }

    async fn delete(&self, user_id: &ID) -> Option<User> {
        delete(user_id, &self.users)
    }
}
