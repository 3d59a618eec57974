use async_graphql::{Context, EmptyMutation, EmptySubscription, Object, Schema};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::extract::State;

use crate::database::models::IntroduceDocument;
use crate::services::IntroduceService;
use crate::state::AppState;

pub type ContentSchema = Schema<QueryRoot, EmptyMutation, EmptySubscription>;

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Full content listing, production-tagged entries first.
    async fn introduces(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<IntroduceDocument>> {
        let service = ctx.data_unchecked::<IntroduceService>();
        Ok(service.list_all().await?)
    }
}

pub fn build_schema(introduces: IntroduceService) -> ContentSchema {
    Schema::build(QueryRoot, EmptyMutation, EmptySubscription)
        .data(introduces)
        .finish()
}

pub async fn graphql_handler(State(state): State<AppState>, req: GraphQLRequest) -> GraphQLResponse {
    state.schema.execute(req.into_inner()).await.into()
}
