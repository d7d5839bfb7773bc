use async_graphql::{Context, Object, Result, SimpleObject};

use super::{UserType, into_graphql_error, state, viewer};
use crate::services::user_service::{self, RegisterUser};

#[derive(Default)]
pub struct UserQuery;

#[Object]
impl UserQuery {
    async fn users(&self, ctx: &Context<'_>) -> Result<Vec<UserType>> {
        let users = user_service::list_users(state(ctx)?.user_repo.as_ref())
            .await
            .map_err(into_graphql_error)?;
        Ok(users.into_iter().map(UserType).collect())
    }

    async fn user(&self, ctx: &Context<'_>, id: i32) -> Result<UserType> {
        user_service::get_user(state(ctx)?.user_repo.as_ref(), id)
            .await
            .map(UserType)
            .map_err(into_graphql_error)
    }

    /// The authenticated user
    async fn me(&self, ctx: &Context<'_>) -> Result<UserType> {
        user_service::me(viewer(ctx))
            .map(UserType)
            .map_err(into_graphql_error)
    }
}

#[derive(SimpleObject)]
pub struct CreateUserPayload {
    user: UserType,
}

#[derive(SimpleObject)]
pub struct TokenAuthPayload {
    token: String,
}

#[derive(SimpleObject)]
pub struct VerifyTokenPayload {
    username: String,
    /// Expiry as a Unix timestamp
    exp: i64,
    /// Issue time of the first token in the refresh chain
    orig_iat: i64,
}

#[derive(Default)]
pub struct UserMutation;

#[Object]
impl UserMutation {
    async fn create_user(
        &self,
        ctx: &Context<'_>,
        username: String,
        password: String,
        email: String,
    ) -> Result<CreateUserPayload> {
        let input = RegisterUser {
            username,
            password,
            email,
        };
        let user = user_service::create_user(state(ctx)?.user_repo.as_ref(), input)
            .await
            .map_err(into_graphql_error)?;
        Ok(CreateUserPayload {
            user: UserType(user),
        })
    }

    /// Exchange a username and password for a token. Send it back as
    /// `Authorization: JWT <token>`.
    async fn token_auth(
        &self,
        ctx: &Context<'_>,
        username: String,
        password: String,
    ) -> Result<TokenAuthPayload> {
        let state = state(ctx)?;
        let token =
            user_service::token_auth(state.user_repo.as_ref(), &state.jwt, &username, &password)
                .await
                .map_err(into_graphql_error)?;
        Ok(TokenAuthPayload { token })
    }

    async fn verify_token(&self, ctx: &Context<'_>, token: String) -> Result<VerifyTokenPayload> {
        let payload =
            user_service::verify_token(&state(ctx)?.jwt, &token).map_err(into_graphql_error)?;
        Ok(VerifyTokenPayload {
            username: payload.username,
            exp: payload.exp as i64,
            orig_iat: payload.orig_iat,
        })
    }

    async fn refresh_token(&self, ctx: &Context<'_>, token: String) -> Result<TokenAuthPayload> {
        let token =
            user_service::refresh_token(&state(ctx)?.jwt, &token).map_err(into_graphql_error)?;
        Ok(TokenAuthPayload { token })
    }
}
