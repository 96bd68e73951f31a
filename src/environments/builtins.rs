//! Built-in environments and their globals.
//!
//! A curated table of the environments lint engines ship with. Browser and
//! worker tables cover the commonly used globals rather than the full DOM
//! surface; hosts that need more inject their own [`EnvironmentLookup`].
//!
//! [`EnvironmentLookup`]: super::EnvironmentLookup

use std::collections::HashMap;
use std::sync::LazyLock;

use super::binding::{Environment, Writability};
use super::EnvironmentLookup;

const ES2015: &[&str] = &[
    "ArrayBuffer",
    "DataView",
    "Float32Array",
    "Float64Array",
    "Int16Array",
    "Int32Array",
    "Int8Array",
    "Map",
    "Promise",
    "Proxy",
    "Reflect",
    "Set",
    "Symbol",
    "Uint16Array",
    "Uint32Array",
    "Uint8Array",
    "Uint8ClampedArray",
    "WeakMap",
    "WeakSet",
];
const ES2017: &[&str] = &["Atomics", "SharedArrayBuffer"];
const ES2020: &[&str] = &["BigInt", "BigInt64Array", "BigUint64Array", "globalThis"];
const ES2021: &[&str] = &["AggregateError", "FinalizationRegistry", "WeakRef"];

const BROWSER: &[(&str, bool)] = &[
    ("alert", false),
    ("atob", false),
    ("Blob", false),
    ("btoa", false),
    ("cancelAnimationFrame", false),
    ("clearInterval", false),
    ("clearTimeout", false),
    ("confirm", false),
    ("console", false),
    ("CustomEvent", false),
    ("document", false),
    ("Element", false),
    ("Event", false),
    ("EventTarget", false),
    ("fetch", false),
    ("File", false),
    ("FormData", false),
    ("Headers", false),
    ("history", false),
    ("HTMLElement", false),
    ("localStorage", false),
    ("location", true),
    ("navigator", false),
    ("Node", false),
    ("onload", true),
    ("onerror", true),
    ("performance", false),
    ("prompt", false),
    ("queueMicrotask", false),
    ("Request", false),
    ("requestAnimationFrame", false),
    ("Response", false),
    ("screen", false),
    ("self", false),
    ("sessionStorage", false),
    ("setInterval", false),
    ("setTimeout", false),
    ("URL", false),
    ("URLSearchParams", false),
    ("WebSocket", false),
    ("window", false),
    ("Worker", false),
    ("XMLHttpRequest", false),
];

const WORKER: &[(&str, bool)] = &[
    ("close", false),
    ("console", false),
    ("fetch", false),
    ("importScripts", false),
    ("onmessage", true),
    ("onerror", true),
    ("postMessage", false),
    ("self", true),
    ("setInterval", false),
    ("setTimeout", false),
    ("clearInterval", false),
    ("clearTimeout", false),
];

const SERVICE_WORKER: &[(&str, bool)] = &[
    ("caches", false),
    ("Cache", false),
    ("CacheStorage", false),
    ("Client", false),
    ("clients", false),
    ("Clients", false),
    ("ExtendableEvent", false),
    ("FetchEvent", false),
    ("registration", false),
    ("skipWaiting", false),
];

const SHARED_NODE_BROWSER: &[(&str, bool)] = &[
    ("clearInterval", false),
    ("clearTimeout", false),
    ("console", false),
    ("setInterval", false),
    ("setTimeout", false),
    ("TextDecoder", false),
    ("TextEncoder", false),
    ("URL", false),
    ("URLSearchParams", false),
];

const NODE: &[(&str, bool)] = &[
    ("__dirname", false),
    ("__filename", false),
    ("Buffer", false),
    ("clearImmediate", false),
    ("clearInterval", false),
    ("clearTimeout", false),
    ("console", false),
    ("exports", true),
    ("global", false),
    ("module", false),
    ("process", false),
    ("queueMicrotask", false),
    ("require", false),
    ("setImmediate", false),
    ("setInterval", false),
    ("setTimeout", false),
    ("TextDecoder", false),
    ("TextEncoder", false),
    ("URL", false),
    ("URLSearchParams", false),
];

const COMMONJS: &[(&str, bool)] = &[
    ("exports", true),
    ("global", false),
    ("module", false),
    ("require", false),
];

const AMD: &[&str] = &["define", "require"];

const MOCHA: &[&str] = &[
    "after",
    "afterEach",
    "before",
    "beforeEach",
    "context",
    "describe",
    "it",
    "mocha",
    "run",
    "setup",
    "specify",
    "suite",
    "suiteSetup",
    "suiteTeardown",
    "teardown",
    "test",
    "xcontext",
    "xdescribe",
    "xit",
    "xspecify",
];

const JASMINE: &[&str] = &[
    "afterAll",
    "afterEach",
    "beforeAll",
    "beforeEach",
    "describe",
    "expect",
    "fail",
    "fdescribe",
    "fit",
    "it",
    "jasmine",
    "pending",
    "spyOn",
    "spyOnProperty",
    "xdescribe",
    "xit",
];

const JEST: &[&str] = &[
    "afterAll",
    "afterEach",
    "beforeAll",
    "beforeEach",
    "describe",
    "expect",
    "fit",
    "it",
    "jest",
    "test",
    "xdescribe",
    "xit",
    "xtest",
];

const QUNIT: &[&str] = &["QUnit"];
const JQUERY: &[&str] = &["$", "jQuery"];
const PHANTOMJS: &[&str] = &["console", "exports", "phantom", "require", "WebPage"];
const PROTOTYPEJS: &[&str] = &["$", "$$", "$A", "$F", "$H", "$R", "$w", "Ajax", "Class", "Element", "Prototype"];
const SHELLJS: &[&str] = &[
    "cat", "cd", "chmod", "config", "cp", "dirs", "echo", "env", "error", "exec", "exit", "find",
    "grep", "ln", "ls", "mkdir", "mv", "popd", "pushd", "pwd", "rm", "sed", "target", "tempdir",
    "test", "touch", "which",
];
const MONGO: &[&str] = &["db", "Mongo", "ObjectId", "print", "printjson", "rs", "sh", "use"];
const PROTRACTOR: &[&str] = &["$", "$$", "browser", "by", "By", "element", "protractor"];
const WEBEXTENSIONS: &[&str] = &["browser", "chrome", "opr"];
const GREASEMONKEY: &[&str] = &[
    "GM",
    "GM_addStyle",
    "GM_deleteValue",
    "GM_getResourceText",
    "GM_getValue",
    "GM_info",
    "GM_listValues",
    "GM_openInTab",
    "GM_setValue",
    "GM_xmlhttpRequest",
    "unsafeWindow",
];

fn from_pairs(pairs: &[(&str, bool)]) -> Environment {
    let globals = pairs
        .iter()
        .map(|(name, writable)| (name.to_string(), Writability::from(*writable)))
        .collect();
    Environment::new(globals)
}

fn readonly(names: &[&str]) -> Environment {
    Environment::uniform(names, Writability::Readonly)
}

/// ES version environments are cumulative: each one includes the globals of
/// every earlier version.
fn es_environment(sets: &[&[&str]]) -> Environment {
    let names: Vec<&str> = sets.iter().flat_map(|set| set.iter().copied()).collect();
    readonly(&names)
}

/// All built-in environments, lazily initialized.
pub static BUILTIN_ENVIRONMENTS: LazyLock<HashMap<&'static str, Environment>> =
    LazyLock::new(|| {
        let mut envs = HashMap::new();

        // ==================== Language Versions ====================
        envs.insert("es6", es_environment(&[ES2015]));
        envs.insert("es2015", es_environment(&[ES2015]));
        envs.insert("es2016", es_environment(&[ES2015]));
        envs.insert("es2017", es_environment(&[ES2015, ES2017]));
        envs.insert("es2018", es_environment(&[ES2015, ES2017]));
        envs.insert("es2019", es_environment(&[ES2015, ES2017]));
        envs.insert("es2020", es_environment(&[ES2015, ES2017, ES2020]));
        envs.insert("es2021", es_environment(&[ES2015, ES2017, ES2020, ES2021]));
        envs.insert("es2022", es_environment(&[ES2015, ES2017, ES2020, ES2021]));

        // ==================== Runtimes ====================
        envs.insert("browser", from_pairs(BROWSER));
        envs.insert("worker", from_pairs(WORKER));
        envs.insert("serviceworker", from_pairs(SERVICE_WORKER));
        envs.insert("shared-node-browser", from_pairs(SHARED_NODE_BROWSER));
        envs.insert("node", from_pairs(NODE));
        envs.insert("commonjs", from_pairs(COMMONJS));
        envs.insert("amd", readonly(AMD));
        envs.insert("phantomjs", readonly(PHANTOMJS));
        envs.insert("webextensions", readonly(WEBEXTENSIONS));
        envs.insert("greasemonkey", readonly(GREASEMONKEY));
        envs.insert("mongo", readonly(MONGO));

        // ==================== Test Frameworks ====================
        envs.insert("mocha", readonly(MOCHA));
        envs.insert("jasmine", readonly(JASMINE));
        envs.insert("jest", readonly(JEST));
        envs.insert("qunit", readonly(QUNIT));
        envs.insert("protractor", readonly(PROTRACTOR));

        // ==================== Libraries ====================
        envs.insert("jquery", readonly(JQUERY));
        envs.insert("prototypejs", readonly(PROTOTYPEJS));
        envs.insert("shelljs", readonly(SHELLJS));

        envs
    });

/// The built-in environment table as an [`EnvironmentLookup`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinEnvironments;

impl EnvironmentLookup for BuiltinEnvironments {
    fn environment(&self, name: &str) -> Option<&Environment> {
        BUILTIN_ENVIRONMENTS.get(name)
    }
}
