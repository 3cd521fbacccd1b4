//! Dish API Handlers

use axum::Json;
use axum::extract::{Extension, Path, Query, State};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::api::{IdList, LabelValue, validate};
use crate::auth::CurrentUser;
use crate::core::AppState;
use crate::db::dao::{Dao, PageParams, QuerySpec};
use crate::db::repository::dish::{self, IMPORT_HEADERS};
use shared::error::{ApiResponse, AppError, AppResult, ErrorCode};
use shared::models::dish::dish_status;
use shared::models::{
    Dish, DishBom, DishBomCreate, DishBomUpdate, DishBranch, DishBranchCreate, DishBranchOut,
    DishBranchUpdate, DishCreate, DishImage, DishImageCreate, DishImageUpdate, DishOut, DishUpdate,
};

/// Query filter for dish listing
#[derive(Debug, Deserialize)]
pub struct DishQuery {
    pub kitchen_id: Option<i64>,
    pub status: Option<i64>,
    pub name: Option<String>,
    pub display_name: Option<String>,
    pub english_name: Option<String>,
    /// 模糊查询（名称/显示名称/英文名称）
    pub fuzzy: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl DishQuery {
    fn to_spec(&self) -> QuerySpec {
        PageParams {
            page: self.page,
            limit: self.limit,
        }
        .to_spec()
        .eq_opt("kitchen_id", self.kitchen_id)
        .eq_opt("status", self.status)
        .like_opt("name", self.name.clone())
        .like_opt("display_name", self.display_name.clone())
        .like_opt("english_name", self.english_name.clone())
        .fuzzy_opt(self.fuzzy.clone())
    }
}

/// GET /api/dishstatusoptions - 菜品状态选择项
pub async fn status_options() -> ApiResponse<Vec<LabelValue>> {
    ApiResponse::success(vec![
        LabelValue {
            label: "新建",
            value: dish_status::NEW,
        },
        LabelValue {
            label: "草稿",
            value: dish_status::DRAFT,
        },
        LabelValue {
            label: "已上传",
            value: dish_status::UPLOADED,
        },
        LabelValue {
            label: "已发布",
            value: dish_status::PUBLISHED,
        },
        LabelValue {
            label: "缺货",
            value: dish_status::OUT_OF_STOCK,
        },
        LabelValue {
            label: "已下架",
            value: dish_status::TAKEN_DOWN,
        },
    ])
}

/// GET /api/dish - 获取菜品列表
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<DishQuery>,
) -> AppResult<ApiResponse<Vec<DishOut>>> {
    let (rows, total) = dish::list(&state.pool, &query.to_spec())
        .await
        .map_err(AppError::from)?;
    Ok(ApiResponse::page(rows, total))
}

/// GET /api/dish/:id - 获取菜品信息
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<DishOut>> {
    let row = dish::get(&state.pool, id).await.map_err(AppError::from)?;
    Ok(ApiResponse::success(row))
}

/// POST /api/dish - 创建菜品（图片指令整批事务执行）
pub async fn create(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Json(payload): Json<DishCreate>,
) -> AppResult<ApiResponse<DishOut>> {
    validate(&payload)?;
    tracing::info!(operator_id = current.id, dish = %payload.name, "Creating dish");
    let created = dish::create(&state.pool, payload)
        .await
        .map_err(AppError::from)?;
    Ok(ApiResponse::success(created))
}

/// PUT /api/dish/:id - 更新菜品信息
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<DishUpdate>,
) -> AppResult<ApiResponse<DishOut>> {
    let updated = dish::update(&state.pool, id, payload)
        .await
        .map_err(AppError::from)?;
    Ok(ApiResponse::success(updated))
}

/// DELETE /api/dish - 批量删除菜品（硬删除，级联图片/标签/成本卡/店铺）
pub async fn delete(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Json(ids): Json<IdList>,
) -> AppResult<ApiResponse<String>> {
    tracing::info!(operator_id = current.id, ids = ?ids.ids, "Deleting dishes");
    dish::delete(&state.pool, &ids.ids)
        .await
        .map_err(AppError::from)?;
    Ok(ApiResponse::message("删除成功"))
}

#[derive(Debug, Deserialize)]
pub struct ImportPayload {
    pub rows: Vec<Map<String, Value>>,
}

/// POST /api/dish/import - 批量导入菜品
pub async fn import(
    State(state): State<AppState>,
    Json(payload): Json<ImportPayload>,
) -> AppResult<ApiResponse<u64>> {
    let inserted = Dao::<Dish>::new(&state.pool)
        .import(IMPORT_HEADERS, &payload.rows)
        .await
        .map_err(AppError::from)?;
    Ok(ApiResponse::success(inserted))
}

// 发布流转（upload/online/offline）的业务语义仍待与系统归属方确认，
// 这里保持为显式的业务错误而不是猜测实现。

/// POST /api/dish/:id/upload - 菜品上传
pub async fn upload(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<()>> {
    dish::get_dish(&state.pool, id).await.map_err(AppError::from)?;
    Err(AppError::new(ErrorCode::PublishNotConfigured))
}

/// POST /api/dish/:id/online - 菜品上线
pub async fn online(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<()>> {
    dish::get_dish(&state.pool, id).await.map_err(AppError::from)?;
    Err(AppError::new(ErrorCode::PublishNotConfigured))
}

/// POST /api/dish/:id/offline - 菜品下线
pub async fn offline(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<()>> {
    dish::get_dish(&state.pool, id).await.map_err(AppError::from)?;
    Err(AppError::new(ErrorCode::PublishNotConfigured))
}

// ==================== 产品图片 ====================

#[derive(Debug, Deserialize)]
pub struct ImageQuery {
    pub product_type: Option<i64>,
    pub product_id: Option<i64>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// GET /api/image - 获取产品图片列表
pub async fn list_images(
    State(state): State<AppState>,
    Query(query): Query<ImageQuery>,
) -> AppResult<ApiResponse<Vec<DishImage>>> {
    let spec = PageParams {
        page: query.page,
        limit: query.limit,
    }
    .to_spec()
    .eq_opt("product_type", query.product_type)
    .eq_opt("product_id", query.product_id);
    let (rows, total) = dish::list_images(&state.pool, &spec)
        .await
        .map_err(AppError::from)?;
    Ok(ApiResponse::page(rows, total))
}

/// GET /api/image/:id - 获取产品图片信息
pub async fn get_image(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<DishImage>> {
    let row = dish::get_image(&state.pool, id)
        .await
        .map_err(AppError::from)?;
    Ok(ApiResponse::success(row))
}

/// POST /api/image - 创建产品图片
pub async fn create_image(
    State(state): State<AppState>,
    Json(payload): Json<DishImageCreate>,
) -> AppResult<ApiResponse<DishImage>> {
    validate(&payload)?;
    let created = dish::create_image(&state.pool, payload)
        .await
        .map_err(AppError::from)?;
    Ok(ApiResponse::success(created))
}

/// PUT /api/image/:id - 更新产品图片
pub async fn update_image(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<DishImageUpdate>,
) -> AppResult<ApiResponse<DishImage>> {
    let updated = dish::update_image(&state.pool, id, payload)
        .await
        .map_err(AppError::from)?;
    Ok(ApiResponse::success(updated))
}

/// DELETE /api/image - 删除产品图片（硬删除）
pub async fn delete_images(
    State(state): State<AppState>,
    Json(ids): Json<IdList>,
) -> AppResult<ApiResponse<String>> {
    dish::delete_images(&state.pool, &ids.ids)
        .await
        .map_err(AppError::from)?;
    Ok(ApiResponse::message("删除成功"))
}

// ==================== 成本卡 ====================

#[derive(Debug, Deserialize)]
pub struct BomQuery {
    pub product_type: Option<i64>,
    pub product_id: Option<i64>,
    pub material_type: Option<i64>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// GET /api/dishbom - 获取成本卡列表
pub async fn list_boms(
    State(state): State<AppState>,
    Query(query): Query<BomQuery>,
) -> AppResult<ApiResponse<Vec<DishBom>>> {
    let spec = PageParams {
        page: query.page,
        limit: query.limit,
    }
    .to_spec()
    .eq_opt("product_type", query.product_type)
    .eq_opt("product_id", query.product_id)
    .eq_opt("material_type", query.material_type);
    let (rows, total) = dish::list_boms(&state.pool, &spec)
        .await
        .map_err(AppError::from)?;
    Ok(ApiResponse::page(rows, total))
}

/// GET /api/dishbom/:id - 获取成本卡信息
pub async fn get_bom(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<DishBom>> {
    let row = dish::get_bom(&state.pool, id).await.map_err(AppError::from)?;
    Ok(ApiResponse::success(row))
}

/// POST /api/dishbom - 创建成本卡
pub async fn create_bom(
    State(state): State<AppState>,
    Json(payload): Json<DishBomCreate>,
) -> AppResult<ApiResponse<DishBom>> {
    let created = dish::create_bom(&state.pool, payload)
        .await
        .map_err(AppError::from)?;
    Ok(ApiResponse::success(created))
}

/// PUT /api/dishbom/:id - 更新成本卡
pub async fn update_bom(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<DishBomUpdate>,
) -> AppResult<ApiResponse<DishBom>> {
    let updated = dish::update_bom(&state.pool, id, payload)
        .await
        .map_err(AppError::from)?;
    Ok(ApiResponse::success(updated))
}

/// DELETE /api/dishbom - 删除成本卡（硬删除）
pub async fn delete_boms(
    State(state): State<AppState>,
    Json(ids): Json<IdList>,
) -> AppResult<ApiResponse<String>> {
    dish::delete_boms(&state.pool, &ids.ids)
        .await
        .map_err(AppError::from)?;
    Ok(ApiResponse::message("删除成功"))
}

// ==================== 菜品店铺 ====================

#[derive(Debug, Deserialize)]
pub struct DishBranchQuery {
    pub dish_id: Option<i64>,
    pub branch_id: Option<i64>,
    pub status: Option<i64>,
    pub fuzzy: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// GET /api/branchdish - 获取菜品店铺列表
pub async fn list_branch_dishes(
    State(state): State<AppState>,
    Query(query): Query<DishBranchQuery>,
) -> AppResult<ApiResponse<Vec<DishBranchOut>>> {
    let spec = PageParams {
        page: query.page,
        limit: query.limit,
    }
    .to_spec()
    .eq_opt("dish_id", query.dish_id)
    .eq_opt("branch_id", query.branch_id)
    .eq_opt("status", query.status)
    .fuzzy_opt(query.fuzzy);
    let (rows, total) = dish::list_branch_dishes(&state.pool, &spec)
        .await
        .map_err(AppError::from)?;
    Ok(ApiResponse::page(rows, total))
}

/// GET /api/branchdish/:id - 获取菜品店铺信息
pub async fn get_branch_dish(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<DishBranch>> {
    let row = dish::get_branch_dish(&state.pool, id)
        .await
        .map_err(AppError::from)?;
    Ok(ApiResponse::success(row))
}

/// POST /api/branchdish - 创建菜品店铺
pub async fn create_branch_dish(
    State(state): State<AppState>,
    Json(payload): Json<DishBranchCreate>,
) -> AppResult<ApiResponse<DishBranch>> {
    let created = dish::create_branch_dish(&state.pool, payload)
        .await
        .map_err(AppError::from)?;
    Ok(ApiResponse::success(created))
}

/// PUT /api/branchdish/:id - 更新菜品店铺
pub async fn update_branch_dish(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<DishBranchUpdate>,
) -> AppResult<ApiResponse<DishBranch>> {
    let updated = dish::update_branch_dish(&state.pool, id, payload)
        .await
        .map_err(AppError::from)?;
    Ok(ApiResponse::success(updated))
}

/// DELETE /api/branchdish - 删除菜品店铺（硬删除）
pub async fn delete_branch_dishes(
    State(state): State<AppState>,
    Json(ids): Json<IdList>,
) -> AppResult<ApiResponse<String>> {
    dish::delete_branch_dishes(&state.pool, &ids.ids)
        .await
        .map_err(AppError::from)?;
    Ok(ApiResponse::message("删除成功"))
}
