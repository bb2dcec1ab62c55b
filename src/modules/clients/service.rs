use std::cmp::Ordering;

use bookstore_db::{crud, Filter, Id, Order, StoreArc};
use bookstore_kernel::{DomainResult, EntityKind};

use super::models::{document_of, full_name_of, Client, ClientCriteria, ClientPayload};

fn by_id(a: &Client, b: &Client) -> Ordering {
    a.id.cmp(&b.id)
}

const LISTING: Order<Client> = Order::ascending("id", by_id);
const FILTERED: Order<Client> = Order::descending("id", by_id);

pub struct ClientService {
    clients: StoreArc<Client>,
}

impl ClientService {
    pub fn new(clients: StoreArc<Client>) -> Self {
        Self { clients }
    }

    pub async fn create(&self, payload: ClientPayload) -> DomainResult<Client> {
        let client = payload.validate()?;
        self.clients.save(client).await
    }

    pub async fn update(&self, id: Id, payload: ClientPayload) -> DomainResult<Client> {
        self.get(id).await?;
        let mut client = payload.validate()?;
        client.id = Some(id);
        self.clients.save(client).await
    }

    pub async fn get(&self, id: Id) -> DomainResult<Client> {
        crud::get_detail(&*self.clients, EntityKind::Client, id).await
    }

    pub async fn list(&self) -> DomainResult<Vec<Client>> {
        crud::list_all(&*self.clients, EntityKind::Client, &LISTING).await
    }

    /// Name and document substrings, book ownership and document type code.
    /// Newest client first.
    pub async fn filter(&self, criteria: ClientCriteria) -> DomainResult<Vec<Client>> {
        let filter = Filter::<Client>::new()
            .contains("full_name", criteria.full_name.as_deref(), full_name_of)
            .contains("document", criteria.document.as_deref(), document_of)
            .equals("has_book", criteria.has_book.map(Some), |c: &Client| c.has_book)
            .equals("document_type", criteria.document_type, |c: &Client| {
                c.document_type.code()
            });

        crud::search(&*self.clients, EntityKind::Client, &filter, &FILTERED).await
    }

    pub async fn delete(&self, id: Option<Id>) -> DomainResult<()> {
        crud::delete::<Client, _>(&*self.clients, EntityKind::Client, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::clients::models::DocumentType;
    use bookstore_db::MemoryStore;
    use chrono::NaiveDate;
    use std::sync::Arc;

    fn client(
        id: Id,
        full_name: &str,
        document: &str,
        has_book: Option<bool>,
        document_type: DocumentType,
    ) -> Client {
        Client {
            id: Some(id),
            full_name: full_name.to_string(),
            document: document.to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            has_book,
            document_type,
        }
    }

    fn seeded() -> ClientService {
        ClientService::new(Arc::new(MemoryStore::with_data(vec![
            client(1, "Gabriel Ferreira", "11122233344", Some(true), DocumentType::Cpf),
            client(2, "Livraria Central Ltda", "12345678000199", Some(false), DocumentType::Cnpj),
            client(3, "Gabriela Souza", "55566677788", None, DocumentType::Cpf),
        ])))
    }

    fn ids(clients: &[Client]) -> Vec<Id> {
        clients.iter().filter_map(|c| c.id).collect()
    }

    #[tokio::test]
    async fn empty_criteria_list_everyone_newest_first() {
        let found = seeded().filter(ClientCriteria::default()).await.unwrap();
        assert_eq!(ids(&found), vec![3, 2, 1]);
    }

    #[tokio::test]
    async fn each_criterion_alone() {
        let service = seeded();

        let by_name = service
            .filter(ClientCriteria {
                full_name: Some("Gabriel".into()),
                ..ClientCriteria::default()
            })
            .await
            .unwrap();
        assert_eq!(ids(&by_name), vec![3, 1]);

        let by_document = service
            .filter(ClientCriteria {
                document: Some("5566".into()),
                ..ClientCriteria::default()
            })
            .await
            .unwrap();
        assert_eq!(ids(&by_document), vec![3]);

        let owners = service
            .filter(ClientCriteria {
                has_book: Some(true),
                ..ClientCriteria::default()
            })
            .await
            .unwrap();
        assert_eq!(ids(&owners), vec![1]);

        let companies = service
            .filter(ClientCriteria {
                document_type: Some(2),
                ..ClientCriteria::default()
            })
            .await
            .unwrap();
        assert_eq!(ids(&companies), vec![2]);
    }

    #[tokio::test]
    async fn criteria_are_combined() {
        let found = seeded()
            .filter(ClientCriteria {
                full_name: Some("Gabriel".into()),
                document_type: Some(1),
                has_book: Some(false),
                ..ClientCriteria::default()
            })
            .await
            .unwrap_err();
        assert_eq!(found.to_string(), "No clients found.");
    }

    #[tokio::test]
    async fn update_replaces_record() {
        let service = seeded();
        let updated = service
            .update(
                3,
                ClientPayload {
                    full_name: Some("Gabriela Souza Lima".into()),
                    document: Some("55566677788".into()),
                    date_of_birth: NaiveDate::from_ymd_opt(1991, 2, 3),
                    has_book: Some(true),
                    document_type: Some(1),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.id, Some(3));
        assert_eq!(service.get(3).await.unwrap().full_name, "Gabriela Souza Lima");
    }

    #[tokio::test]
    async fn invalid_document_type_is_rejected() {
        let err = seeded()
            .create(ClientPayload {
                full_name: Some("Maria Silva".into()),
                document: Some("99988877766".into()),
                date_of_birth: NaiveDate::from_ymd_opt(1985, 3, 4),
                has_book: None,
                document_type: Some(5),
            })
            .await
            .unwrap_err();
        assert!(err.is_validation());
    }
}
