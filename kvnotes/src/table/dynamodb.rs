//! DynamoDB table.
//!
//! Table schema:
//! - `pk` partition key (S)
//! - `sk` sort key (S)
//! - any other string attributes

use std::collections::HashMap;
use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use log::{debug, info, trace};

use crate::lib_constants::{PARTITION_KEY_ATTRIBUTE, SORT_KEY_ATTRIBUTE};
use crate::table::{Attributes, Item, KeyValueTable, TableError, TableKey};

pub struct DynamoDbTable {
    client: Client,
    table_name: String,
}

impl DynamoDbTable {
    pub async fn new(
        table_name: impl Into<String>,
        endpoint_url: Option<&str>,
    ) -> Self {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;

        let client = if let Some(endpoint) = endpoint_url {
            let dynamo_config = aws_sdk_dynamodb::config::Builder::from(&config)
                .endpoint_url(endpoint)
                .build();
            Client::from_conf(dynamo_config)
        } else {
            Client::new(&config)
        };

        let table_name = table_name.into();
        info!("using DynamoDB table \"{table_name}\"");

        DynamoDbTable { client, table_name }
    }
}

fn backend_error(e: impl std::error::Error + Send + Sync + 'static) -> TableError {
    TableError::Backend(Box::new(e))
}

fn key_to_dynamo(key: &TableKey) -> HashMap<String, AttributeValue> {
    HashMap::from([
        (PARTITION_KEY_ATTRIBUTE.to_owned(), AttributeValue::S(key.pk.clone())),
        (SORT_KEY_ATTRIBUTE.to_owned(), AttributeValue::S(key.sk.clone())),
    ])
}

fn item_to_dynamo(item: Item) -> HashMap<String, AttributeValue> {
    let mut ret = key_to_dynamo(&item.key);
    ret.extend(
        item.attributes
            .into_iter()
            .map(|(name, value)| (name, AttributeValue::S(value)))
    );
    ret
}

fn item_from_dynamo(
    mut raw: HashMap<String, AttributeValue>,
) -> Result<Item, TableError> {
    let mut take_key = |name: &str| match raw.remove(name) {
        Some(AttributeValue::S(value)) => Ok(value),
        Some(_) => Err(TableError::MalformedItem {
            reason: format!("key attribute \"{name}\" is not a string"),
        }),
        None => Err(TableError::MalformedItem {
            reason: format!("key attribute \"{name}\" is missing"),
        }),
    };
    let key = TableKey {
        pk: take_key(PARTITION_KEY_ATTRIBUTE)?,
        sk: take_key(SORT_KEY_ATTRIBUTE)?,
    };
    let attributes = raw
        .into_iter()
        .filter_map(|(name, value)| match value {
            AttributeValue::S(value) => Some((name, value)),
            _ => {
                trace!("ignoring non-string attribute \"{name}\" of {key:?}");
                None
            },
        })
        .collect();
    Ok(Item { key, attributes })
}

/// `SET #a0 = :v0, #a1 = :v1, ...` with the matching name and value maps.
fn set_expression(
    attributes: Attributes,
) -> (String, HashMap<String, String>, HashMap<String, AttributeValue>) {
    let mut assignments = Vec::with_capacity(attributes.len());
    let mut names = HashMap::with_capacity(attributes.len());
    let mut values = HashMap::with_capacity(attributes.len());
    for (i, (name, value)) in attributes.into_iter().enumerate() {
        assignments.push(format!("#a{i} = :v{i}"));
        names.insert(format!("#a{i}"), name);
        values.insert(format!(":v{i}"), AttributeValue::S(value));
    }
    (format!("SET {}", assignments.join(", ")), names, values)
}

#[async_trait]
impl KeyValueTable for DynamoDbTable {
    async fn get_item(
        &self,
        key: &TableKey,
    ) -> Result<Option<Item>, TableError> {
        let result = self.client
            .get_item()
            .table_name(&self.table_name)
            .set_key(Some(key_to_dynamo(key)))
            .send()
            .await
            .map_err(backend_error)?;
        result.item.map(item_from_dynamo).transpose()
    }

    async fn put_item(&self, item: Item) -> Result<(), TableError> {
        debug!("put_item {:?} into \"{}\"", item.key, self.table_name);
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item_to_dynamo(item)))
            .send()
            .await
            .map_err(backend_error)?;
        Ok(())
    }

    async fn update_item(
        &self,
        key: &TableKey,
        attributes: Attributes,
    ) -> Result<Item, TableError> {
        debug!("update_item {key:?} in \"{}\"", self.table_name);
        let (expression, names, values) = set_expression(attributes);
        let result = self.client
            .update_item()
            .table_name(&self.table_name)
            .set_key(Some(key_to_dynamo(key)))
            .update_expression(expression)
            .set_expression_attribute_names(Some(names))
            .set_expression_attribute_values(Some(values))
            .condition_expression(format!("attribute_exists({PARTITION_KEY_ATTRIBUTE})"))
            .return_values(ReturnValue::AllNew)
            .send()
            .await
            .map_err(|e| {
                if e.as_service_error()
                    .is_some_and(|e| e.is_conditional_check_failed_exception())
                {
                    TableError::ConditionalCheckFailed
                } else {
                    backend_error(e)
                }
            })?;
        let attributes = result.attributes
            .ok_or_else(|| TableError::MalformedItem {
                reason: "update returned no attributes".into(),
            })?;
        item_from_dynamo(attributes)
    }

    async fn delete_item(&self, key: &TableKey) -> Result<(), TableError> {
        debug!("delete_item {key:?} from \"{}\"", self.table_name);
        self.client
            .delete_item()
            .table_name(&self.table_name)
            .set_key(Some(key_to_dynamo(key)))
            .send()
            .await
            .map_err(backend_error)?;
        Ok(())
    }

    async fn query(
        &self,
        pk: &str,
        sk_prefix: &str,
    ) -> Result<Vec<Item>, TableError> {
        debug!("query partition \"{pk}\" of \"{}\"", self.table_name);
        let mut ret = Vec::new();
        let mut exclusive_start_key = None;
        loop {
            let page = self.client
                .query()
                .table_name(&self.table_name)
                .key_condition_expression("#pk = :pk AND begins_with(#sk, :prefix)")
                .expression_attribute_names("#pk", PARTITION_KEY_ATTRIBUTE)
                .expression_attribute_names("#sk", SORT_KEY_ATTRIBUTE)
                .expression_attribute_values(":pk", AttributeValue::S(pk.to_owned()))
                .expression_attribute_values(":prefix", AttributeValue::S(sk_prefix.to_owned()))
                .set_exclusive_start_key(exclusive_start_key)
                .send()
                .await
                .map_err(backend_error)?;
            for raw in page.items.unwrap_or_default() {
                ret.push(item_from_dynamo(raw)?);
            }
            match page.last_evaluated_key {
                Some(key) if !key.is_empty() => exclusive_start_key = Some(key),
                _ => break,
            }
        }
        trace!("query of partition \"{pk}\" returned {} items", ret.len());
        Ok(ret)
    }
}
