//! Declarative generation of program entries.
//!
//! Each program is described once with [`binding!`]: its positional
//! (required) arguments, its optional matrix and model inputs, its scalar
//! parameters with their defaults, and its outputs in declaration order. The
//! macro generates
//!
//! - an options record with public fields, a `Default` impl carrying the
//!   documented defaults, `new()` and a `bon` builder,
//! - an output record with `into_tuple()`,
//! - the entry function, which opens an environment, forwards every
//!   positional argument, every `Some` input and every parameter that differs
//!   from its default, marks all outputs as requested, invokes the program,
//!   pulls outputs in order and closes the environment.
//!
//! A parameter explicitly set to its default is never forwarded, so it is
//! indistinguishable from one left alone.
//!
//! Slot kinds: `bool`, `int`, `double`, `string`, `vec_int`, `vec_string`,
//! `matrix`, `umatrix`, `row`, `col`, `urow`, `ucol`, `matrix_with_info` and
//! `model(T)`.

use crate::env::Environment;
use crate::error::Result;

/// Scalar option values forwarded by generated entries.
pub(crate) trait ScalarParam {
    fn push_param(&self, env: &mut Environment<'_>, name: &str) -> Result<()>;
}

impl ScalarParam for bool {
    fn push_param(&self, env: &mut Environment<'_>, name: &str) -> Result<()> {
        env.set_bool(name, *self)
    }
}

impl ScalarParam for i32 {
    fn push_param(&self, env: &mut Environment<'_>, name: &str) -> Result<()> {
        env.set_int(name, *self)
    }
}

impl ScalarParam for f64 {
    fn push_param(&self, env: &mut Environment<'_>, name: &str) -> Result<()> {
        env.set_double(name, *self)
    }
}

impl ScalarParam for String {
    fn push_param(&self, env: &mut Environment<'_>, name: &str) -> Result<()> {
        env.set_string(name, self)
    }
}

impl ScalarParam for Vec<i32> {
    fn push_param(&self, env: &mut Environment<'_>, name: &str) -> Result<()> {
        env.set_vec_int(name, self)
    }
}

impl ScalarParam for Vec<String> {
    fn push_param(&self, env: &mut Environment<'_>, name: &str) -> Result<()> {
        env.set_vec_string(name, self)
    }
}

// =============================================================================
// Slot Kind Helpers
// =============================================================================

macro_rules! arg_type {
    (matrix_with_info) => { &$crate::MatrixWithInfo };
    (model($t:ty)) => { $t };
    (int) => { i32 };
    (double) => { f64 };
    (bool) => { bool };
    (string) => { &str };
    (vec_int) => { &[i32] };
    (vec_string) => { &[String] };
    ($flavor:ident) => { &::ndarray::Array2<f64> };
}

macro_rules! input_type {
    (matrix_with_info) => { $crate::MatrixWithInfo };
    (model($t:ty)) => { $t };
    ($flavor:ident) => { ::ndarray::Array2<f64> };
}

macro_rules! output_type {
    (matrix_with_info) => { ::core::option::Option<$crate::MatrixWithInfo> };
    (model($t:ty)) => { ::core::option::Option<$t> };
    (int) => { i32 };
    (double) => { f64 };
    (bool) => { bool };
    (string) => { String };
    (vec_int) => { Vec<i32> };
    (vec_string) => { Vec<String> };
    ($flavor:ident) => { ::core::option::Option<::ndarray::Array2<f64>> };
}

macro_rules! flavor_of {
    (matrix) => { $crate::Flavor::Matrix };
    (umatrix) => { $crate::Flavor::UMatrix };
    (row) => { $crate::Flavor::Row };
    (col) => { $crate::Flavor::Col };
    (urow) => { $crate::Flavor::URow };
    (ucol) => { $crate::Flavor::UCol };
}

macro_rules! push_arg {
    ($env:ident, $name:expr, $value:expr, matrix_with_info) => {
        $env.push_matrix_with_info($name, $value)?
    };
    ($env:ident, $name:expr, $value:expr, model($t:ty)) => {{
        $value.install(&mut $env, $name)?;
        $env.mark_passed($name)?;
    }};
    ($env:ident, $name:expr, $value:expr, int) => {{
        $env.set_int($name, $value)?;
        $env.mark_passed($name)?;
    }};
    ($env:ident, $name:expr, $value:expr, double) => {{
        $env.set_double($name, $value)?;
        $env.mark_passed($name)?;
    }};
    ($env:ident, $name:expr, $value:expr, bool) => {{
        $env.set_bool($name, $value)?;
        $env.mark_passed($name)?;
    }};
    ($env:ident, $name:expr, $value:expr, string) => {{
        $env.set_string($name, $value)?;
        $env.mark_passed($name)?;
    }};
    ($env:ident, $name:expr, $value:expr, vec_int) => {{
        $env.set_vec_int($name, $value)?;
        $env.mark_passed($name)?;
    }};
    ($env:ident, $name:expr, $value:expr, vec_string) => {{
        $env.set_vec_string($name, $value)?;
        $env.mark_passed($name)?;
    }};
    ($env:ident, $name:expr, $value:expr, $flavor:ident) => {
        $env.push_matrix($name, $value.view(), flavor_of!($flavor))?
    };
}

macro_rules! pull_out {
    ($env:ident, $name:expr, matrix_with_info) => {
        $env.pull_matrix_with_info($name)?
    };
    ($env:ident, $name:expr, model($t:ty)) => {
        <$t>::capture(&mut $env, $name)?
    };
    ($env:ident, $name:expr, int) => {
        $env.get_int($name)?
    };
    ($env:ident, $name:expr, double) => {
        $env.get_double($name)?
    };
    ($env:ident, $name:expr, bool) => {
        $env.get_bool($name)?
    };
    ($env:ident, $name:expr, string) => {
        $env.get_string($name)?
    };
    ($env:ident, $name:expr, vec_int) => {
        $env.get_vec_int($name)?
    };
    ($env:ident, $name:expr, vec_string) => {
        $env.get_vec_string($name)?
    };
    ($env:ident, $name:expr, $flavor:ident) => {
        $env.pull_matrix($name, flavor_of!($flavor))?
    };
}

macro_rules! param_name {
    ($param:ident) => {
        stringify!($param)
    };
    ($param:ident, $native:literal) => {
        $native
    };
}

// =============================================================================
// Entry Generator
// =============================================================================

macro_rules! binding {
    (
        $(#[$fn_attr:meta])*
        fn $func:ident => $program:literal;

        $(#[$opt_attr:meta])*
        options $options:ident $(<$lt:lifetime>)? {
            required {
                $($req:ident : $rkind:ident $(($rty:ty))?),* $(,)?
            }
            inputs {
                $($(#[$in_attr:meta])* $input:ident : $ikind:ident $(($ity:ty))?),* $(,)?
            }
            params {
                $($(#[$p_attr:meta])* $param:ident $(as $pname:literal)? : $pty:ty = $pdefault:expr),* $(,)?
            }
        }

        $(#[$out_attr:meta])*
        output $output:ident {
            $($(#[$o_attr:meta])* $out:ident : $okind:ident $(($oty:ty))?),* $(,)?
        }
    ) => {
        $(#[$opt_attr])*
        #[derive(Debug, Clone, ::bon::Builder)]
        pub struct $options $(<$lt>)? {
            $(
                $(#[$in_attr])*
                pub $input: ::core::option::Option<input_type!($ikind $(($ity))?)>,
            )*
            $(
                $(#[$p_attr])*
                #[builder(default = $pdefault)]
                pub $param: $pty,
            )*
            /// Enable native progress output for the duration of the call.
            #[builder(default)]
            pub verbose: bool,
        }

        impl $(<$lt>)? Default for $options $(<$lt>)? {
            fn default() -> Self {
                Self {
                    $($input: None,)*
                    $($param: $pdefault,)*
                    verbose: false,
                }
            }
        }

        impl $(<$lt>)? $options $(<$lt>)? {
            /// All parameters at their defaults.
            pub fn new() -> Self {
                Self::default()
            }
        }

        $(#[$out_attr])*
        #[derive(Debug)]
        pub struct $output {
            $(
                $(#[$o_attr])*
                pub $out: output_type!($okind $(($oty))?),
            )*
        }

        impl $output {
            /// All outputs, in declaration order.
            pub fn into_tuple(self) -> ($(output_type!($okind $(($oty))?),)*) {
                ($(self.$out,)*)
            }
        }

        $(#[$fn_attr])*
        pub fn $func $(<$lt>)? (
            runtime: &$crate::Runtime,
            $($req: arg_type!($rkind $(($rty))?),)*
            options: &$options $(<$lt>)?,
        ) -> $crate::Result<$output> {
            #[allow(unused_imports)]
            use $crate::schema::ScalarParam as _;

            #[allow(unused_variables)]
            let defaults: $options $(<$lt>)? = Default::default();
            let mut env = $crate::Environment::open(runtime, $program)?;

            $(push_arg!(env, stringify!($req), $req, $rkind $(($rty))?);)*
            $(
                if let Some(value) = options.$input.as_ref() {
                    push_arg!(env, stringify!($input), value, $ikind $(($ity))?);
                }
            )*
            $(
                if options.$param != defaults.$param {
                    let name = param_name!($param $(, $pname)?);
                    options.$param.push_param(&mut env, name)?;
                    env.mark_passed(name)?;
                }
            )*
            if options.verbose {
                env.set_bool("verbose", true)?;
                env.mark_passed("verbose")?;
                env.enable_verbose()?;
            }
            $(env.mark_passed(stringify!($out))?;)*

            env.invoke()?;
            let output = $output {
                $($out: pull_out!(env, stringify!($out), $okind $(($oty))?),)*
            };
            env.close()?;
            Ok(output)
        }
    };
}
