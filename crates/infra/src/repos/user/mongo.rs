use super::IUserRepo;
use crate::repos::shared::{mongo_repo, mongo_repo::MongoDocument};
use chrono_tz::Tz;
use glucomate_domain::{PhoneNumber, User, ID};
use mongodb::{
    bson::{doc, oid::ObjectId, Document},
    Collection, Database,
};
use serde::{Deserialize, Serialize};

pub struct MongoUserRepo {
    collection: Collection<Document>,
}

impl MongoUserRepo {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("users"),
        }
    }
}

#[async_trait::async_trait]
impl IUserRepo for MongoUserRepo {
    async fn insert(&self, user: &User) -> anyhow::Result<()> {
        mongo_repo::insert::<_, UserMongo>(&self.collection, user).await
    }

    async fn find(&self, user_id: &ID) -> Option<User> {
        mongo_repo::find::<_, UserMongo>(&self.collection, user_id.inner_ref()).await
    }

    async fn find_by_api_key(&self, api_key: &str) -> Option<User> {
        let filter = doc! {
            "secret_api_key": api_key
        };
        mongo_repo::find_one_by::<_, UserMongo>(&self.collection, filter).await
    }

    async fn find_by_email(&self, email: &str) -> Option<User> {
        let filter = doc! {
            "email": email
        };
        mongo_repo::find_one_by::<_, UserMongo>(&self.collection, filter).await
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct UserMongo {
    _id: ObjectId,
    first_name: String,
    last_name: String,
    email: String,
    phone: PhoneNumber,
    timezone: Tz,
    secret_api_key: String,
    created_at: i64,
}

impl MongoDocument<User> for UserMongo {
    fn to_domain(self) -> User {
        User {
            id: ID::from(self._id),
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
            timezone: self.timezone,
            secret_api_key: self.secret_api_key,
            created_at: self.created_at,
        }
    }

    fn from_domain(user: &User) -> Self {
        Self {
            _id: *user.id.inner_ref(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
            timezone: user.timezone,
            secret_api_key: user.secret_api_key.clone(),
            created_at: user.created_at,
        }
    }
}
