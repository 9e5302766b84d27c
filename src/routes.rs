use actix_web::{delete, get, post, put, web, HttpResponse};

use crate::error::AppError;
use crate::store::UserStore;
use crate::user::User;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(create_user)
        .service(list_users)
        .service(get_user)
        .service(update_user)
        .service(delete_user);
}

#[post("/users")]
async fn create_user(
    store: web::Data<UserStore>,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    let user = User::from_json(&body)?;
    store
        .insert(&user)
        .await
        .map_err(AppError::store("Insert user"))?;
    Ok(HttpResponse::Created().finish())
}

#[get("/users")]
async fn list_users(store: web::Data<UserStore>) -> Result<HttpResponse, AppError> {
    let users = store
        .list_all()
        .await
        .map_err(AppError::store("List users"))?;
    Ok(HttpResponse::Ok().json(users))
}

#[get("/users/{email}")]
async fn get_user(
    store: web::Data<UserStore>,
    email: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let user = store
        .find_by_email(&email)
        .await
        .map_err(AppError::store("Find user"))?;
    match user {
        Some(user) => Ok(HttpResponse::Ok().json(user)),
        None => Ok(HttpResponse::NotFound().finish()),
    }
}

// Zero matching rows still answers 200, for update and delete alike.
#[put("/users/{email}")]
async fn update_user(
    store: web::Data<UserStore>,
    email: web::Path<String>,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    let user = User::from_json(&body)?;
    let affected = store
        .update(&user.name, &email)
        .await
        .map_err(AppError::store("Update user"))?;
    log::debug!("renamed {} row(s) for {}", affected, email);
    Ok(HttpResponse::Ok().finish())
}

#[delete("/users/{email}")]
async fn delete_user(
    store: web::Data<UserStore>,
    email: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let affected = store
        .delete(&email)
        .await
        .map_err(AppError::store("Delete user"))?;
    log::debug!("deleted {} row(s) for {}", affected, email);
    Ok(HttpResponse::Ok().finish())
}
