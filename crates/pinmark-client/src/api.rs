use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use pinmark_types::{Country, DeleteOutcome, Location, LocationPatch, NewLocation, UpdateOutcome};

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::transport::GraphQlTransport;

/// Backend holding the authoritative location list.
///
/// A client is built over exactly one backend; the remote GraphQL service
/// and on-device storage are alternatives, never layered.
#[async_trait]
pub trait LocationApi: Send + Sync {
    async fn list(&self) -> Result<Vec<Location>, ClientError>;
    async fn create(&self, new: &NewLocation) -> Result<Location, ClientError>;
    async fn update(&self, id: Uuid, patch: &LocationPatch) -> Result<UpdateOutcome, ClientError>;
    async fn delete(&self, id: Uuid) -> Result<DeleteOutcome, ClientError>;
}

/// Read-only country reference data.
#[async_trait]
pub trait CountryApi: Send + Sync {
    async fn countries(&self) -> Result<Vec<Country>, ClientError>;
    async fn country(&self, code: &str) -> Result<Option<Country>, ClientError>;
}

const LOCATION_FIELDS: &str = "id name latitude longitude color imageBase64";

const COUNTRY_FIELDS: &str = "id name code language defaultLatitude defaultLongitude";

fn list_query() -> String {
    format!("query Locations {{ locations {{ {LOCATION_FIELDS} }} }}")
}

fn create_mutation() -> String {
    format!(
        "mutation CreateLocation($latitude: Float!, $longitude: Float!, $name: String!, $color: String!, $imageBase64: String) {{
            createLocation(latitude: $latitude, longitude: $longitude, name: $name, color: $color, imageBase64: $imageBase64) {{ {LOCATION_FIELDS} }}
        }}"
    )
}

fn update_mutation() -> String {
    format!(
        "mutation UpdateLocation($id: ID!, $name: String, $latitude: Float, $longitude: Float, $color: String, $imageBase64: String) {{
            updateLocation(id: $id, name: $name, latitude: $latitude, longitude: $longitude, color: $color, imageBase64: $imageBase64) {{ {LOCATION_FIELDS} }}
        }}"
    )
}

const DELETE_MUTATION: &str = "mutation DeleteLocation($id: ID!) { deleteLocation(id: $id) }";

#[derive(Deserialize)]
struct ListData {
    locations: Vec<Location>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateData {
    create_location: Location,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateData {
    update_location: Option<Location>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeleteData {
    delete_location: bool,
}

#[derive(Deserialize)]
struct CountriesData {
    countries: Vec<Country>,
}

#[derive(Deserialize)]
struct CountryData {
    country: Option<Country>,
}

/// [`LocationApi`] over the Pinmark GraphQL endpoint.
#[derive(Clone)]
pub struct RemoteLocationApi {
    transport: GraphQlTransport,
}

impl RemoteLocationApi {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            transport: GraphQlTransport::new(config.endpoint.clone()),
        }
    }

    pub fn with_transport(transport: GraphQlTransport) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl LocationApi for RemoteLocationApi {
    async fn list(&self) -> Result<Vec<Location>, ClientError> {
        let data: ListData = self.transport.execute(&list_query(), json!({})).await?;
        Ok(data.locations)
    }

    async fn create(&self, new: &NewLocation) -> Result<Location, ClientError> {
        let variables = serde_json::to_value(new)?;
        let data: CreateData = self.transport.execute(&create_mutation(), variables).await?;
        Ok(data.create_location)
    }

    async fn update(&self, id: Uuid, patch: &LocationPatch) -> Result<UpdateOutcome, ClientError> {
        // Only the supplied fields go out; absent variables leave the stored value alone.
        let mut variables = serde_json::to_value(patch)?;
        variables["id"] = json!(id);

        let data: UpdateData = self.transport.execute(&update_mutation(), variables).await?;
        Ok(match data.update_location {
            Some(location) => UpdateOutcome::Updated(location),
            None => UpdateOutcome::NotFound,
        })
    }

    async fn delete(&self, id: Uuid) -> Result<DeleteOutcome, ClientError> {
        let data: DeleteData = self
            .transport
            .execute(DELETE_MUTATION, json!({ "id": id }))
            .await?;
        Ok(if data.delete_location {
            DeleteOutcome::Deleted(id)
        } else {
            DeleteOutcome::NotFound
        })
    }
}

#[async_trait]
impl CountryApi for RemoteLocationApi {
    async fn countries(&self) -> Result<Vec<Country>, ClientError> {
        let query = format!("query Countries {{ countries {{ {COUNTRY_FIELDS} }} }}");
        let data: CountriesData = self.transport.execute(&query, json!({})).await?;
        Ok(data.countries)
    }

    async fn country(&self, code: &str) -> Result<Option<Country>, ClientError> {
        let query = format!("query Country($code: String!) {{ country(code: $code) {{ {COUNTRY_FIELDS} }} }}");
        let data: CountryData = self.transport.execute(&query, json!({ "code": code })).await?;
        Ok(data.country)
    }
}
