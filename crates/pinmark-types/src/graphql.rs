use async_graphql::{ComplexObject, ID};

use crate::models::{Country, Location};

// Ids travel as GraphQL `ID` strings rather than the UUID scalar.

#[ComplexObject]
impl Location {
    async fn id(&self) -> ID {
        ID(self.id.to_string())
    }
}

#[ComplexObject]
impl Country {
    async fn id(&self) -> ID {
        ID(self.id.to_string())
    }
}
