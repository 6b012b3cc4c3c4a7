use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use atelier_core::error::AppError;
use atelier_core::result::AppResult;
use atelier_entity::user::{
    CreateCustomer, CreateRetailer, Customer, Retailer, UpdateCustomer, UpdateRetailer,
};

use super::MemoryStore;
use crate::store::{CustomerStore, RetailerStore};

fn same_email(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}

fn duplicate_email() -> AppError {
    AppError::conflict("Email already registered")
}

#[async_trait]
impl RetailerStore for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Retailer>> {
        let tables = self.tables.read().await;
        Ok(tables.retailers.iter().find(|r| r.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Retailer>> {
        let tables = self.tables.read().await;
        Ok(tables
            .retailers
            .iter()
            .find(|r| same_email(&r.email, email))
            .cloned())
    }

    async fn create(&self, data: CreateRetailer) -> AppResult<Retailer> {
        let mut tables = self.tables.write().await;
        if tables.retailers.iter().any(|r| same_email(&r.email, &data.email)) {
            return Err(duplicate_email());
        }
        let retailer = Retailer {
            id: Uuid::new_v4(),
            business_name: data.business_name,
            owner_name: data.owner_name,
            email: data.email,
            password_hash: data.password_hash,
            contact_number: data.contact_number,
            address: data.address,
            gst_number: data.gst_number,
            pan_number: data.pan_number,
            logo_url: None,
            about: None,
            working_hours: None,
            bank_details: None,
            created_at: Utc::now(),
        };
        tables.retailers.push(retailer.clone());
        Ok(retailer)
    }

    async fn update(&self, id: Uuid, data: &UpdateRetailer) -> AppResult<Option<Retailer>> {
        let mut tables = self.tables.write().await;
        if let Some(email) = &data.email {
            if tables
                .retailers
                .iter()
                .any(|r| r.id != id && same_email(&r.email, email))
            {
                return Err(duplicate_email());
            }
        }
        let Some(r) = tables.retailers.iter_mut().find(|r| r.id == id) else {
            return Ok(None);
        };
        macro_rules! set {
            ($field:ident) => {
                if let Some(v) = &data.$field {
                    r.$field = v.clone();
                }
            };
            (opt $field:ident) => {
                if let Some(v) = &data.$field {
                    r.$field = Some(v.clone());
                }
            };
        }
        set!(business_name);
        set!(owner_name);
        set!(email);
        set!(contact_number);
        set!(address);
        set!(opt gst_number);
        set!(opt pan_number);
        set!(opt logo_url);
        set!(opt about);
        set!(opt working_hours);
        set!(opt bank_details);
        Ok(Some(r.clone()))
    }
}

#[async_trait]
impl CustomerStore for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Customer>> {
        let tables = self.tables.read().await;
        Ok(tables.customers.iter().find(|c| c.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Customer>> {
        let tables = self.tables.read().await;
        Ok(tables
            .customers
            .iter()
            .find(|c| same_email(&c.email, email))
            .cloned())
    }

    async fn create(&self, data: CreateCustomer) -> AppResult<Customer> {
        let mut tables = self.tables.write().await;
        if tables.customers.iter().any(|c| same_email(&c.email, &data.email)) {
            return Err(duplicate_email());
        }
        let customer = Customer {
            id: Uuid::new_v4(),
            name: data.name,
            email: data.email,
            password_hash: data.password_hash,
            contact_number: data.contact_number,
            address: data.address,
            created_at: Utc::now(),
        };
        tables.customers.push(customer.clone());
        Ok(customer)
    }

    async fn update(&self, id: Uuid, data: &UpdateCustomer) -> AppResult<Option<Customer>> {
        let mut tables = self.tables.write().await;
        if let Some(email) = &data.email {
            if tables
                .customers
                .iter()
                .any(|c| c.id != id && same_email(&c.email, email))
            {
                return Err(duplicate_email());
            }
        }
        let Some(c) = tables.customers.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };
        if let Some(name) = &data.name {
            c.name = name.clone();
        }
        if let Some(email) = &data.email {
            c.email = email.clone();
        }
        if let Some(contact) = &data.contact_number {
            c.contact_number = Some(contact.clone());
        }
        if let Some(address) = &data.address {
            c.address = Some(address.clone());
        }
        Ok(Some(c.clone()))
    }
}
