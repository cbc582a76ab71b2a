//! 可插拔对象缓存
//!
//! 通过 ctor 在启动前注册缓存实现，运行时按配置名称选择。

pub mod object_cache;
pub mod register;
pub mod traits;

pub use traits::{CacheResult, ObjectCache};

/// 声明并注册一个对象缓存插件
///
/// 实现类型需要提供 `fn new() -> Result<Self, String>`。
#[macro_export]
macro_rules! declare_object_cache_plugin {
    ($name:expr, $cache_type:ty) => {
        ::paste::paste! {
            #[ctor::ctor]
            fn [<__register_object_cache_ $cache_type:snake>]() {
                $crate::cache::register::register_object_cache_plugin(
                    $name,
                    ::std::sync::Arc::new(|| {
                        Box::pin(async {
                            let cache = <$cache_type>::new()
                                .map_err($crate::errors::PortalError::cache_connection)?;
                            Ok(Box::new(cache) as Box<dyn $crate::cache::ObjectCache>)
                        })
                            as $crate::cache::register::BoxedObjectCacheFuture
                    }),
                );
            }
        }
    };
}
