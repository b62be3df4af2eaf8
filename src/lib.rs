//! 博客后端库
//! 账户注册登录与文章增删改查，基于无状态签名令牌的路由守卫

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repository;
pub mod routes;
pub mod services;
pub mod telemetry;
